//! Simple command that converts UUIDv7 strings into UUIDv4 facades and vice versa

use std::{env, io, io::Write, process::ExitCode};

use uuid47::{Key, Uuid};

struct Options {
    decode: bool,
    key: Key,
    uuids: Vec<String>,
}

fn main() -> io::Result<ExitCode> {
    let mut args = env::args();
    let program = args.next();
    let usage = || {
        eprintln!(
            "Usage: {} (encode|decode) -k <k0-hex>:<k1-hex> <uuid>...",
            program.as_deref().unwrap_or("uuid47")
        );
    };

    let opts = match parse_args(args) {
        Ok(opts) => opts,
        Err(message) => {
            eprintln!("Error: {}", message);
            usage();
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut buf = io::BufWriter::new(io::stdout());
    for arg in &opts.uuids {
        match convert(arg, &opts) {
            Ok(uuid) => writeln!(buf, "{}", uuid)?,
            Err(message) => {
                buf.flush()?;
                eprintln!("Error: {}", message);
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    buf.flush()?;

    Ok(ExitCode::SUCCESS)
}

fn convert(arg: &str, opts: &Options) -> Result<Uuid, String> {
    let uuid = arg
        .parse::<Uuid>()
        .map_err(|err| format!("{} '{}'", err, arg))?;
    let converted = if opts.decode {
        uuid47::decode(uuid, &opts.key)
    } else {
        uuid47::encode(uuid, &opts.key)
    };
    converted.map_err(|err| format!("{} in '{}'", err, arg))
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let decode = match args.next().as_deref() {
        Some("encode") => false,
        Some("decode") => true,
        Some(other) => return Err(format!("unrecognized command '{}'", other)),
        None => return Err("command missing".to_owned()),
    };

    let mut key = None;
    let mut uuids = Vec::new();
    while let Some(arg) = args.next() {
        if arg != "-k" {
            uuids.push(arg);
            continue;
        }
        if key.is_some() {
            return Err("option 'k' given more than once".to_owned());
        }
        let Some(k_arg) = args.next() else {
            return Err("argument to option 'k' missing".to_owned());
        };
        let Some(k) = parse_key(&k_arg) else {
            return Err(format!("invalid argument to option 'k': '{}'", k_arg));
        };
        key.replace(k);
    }

    let Some(key) = key else {
        return Err("option 'k' missing".to_owned());
    };
    Ok(Options { decode, key, uuids })
}

fn parse_key(src: &str) -> Option<Key> {
    let (k0, k1) = src.split_once(':')?;
    let k0 = u64::from_str_radix(k0.strip_prefix("0x").unwrap_or(k0), 16).ok()?;
    let k1 = u64::from_str_radix(k1.strip_prefix("0x").unwrap_or(k1), 16).ok()?;
    Some(Key::new(k0, k1))
}
