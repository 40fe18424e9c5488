use clap::{arg, crate_version, Command};
use std::io::{stdin, stdout};
use lzwgc::codec;

const RCH: &str = "unreachable was reached";
const DEFAULT_BITS: &str = "12";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let long_help =
"Examples:
---------
Compress:      `lzwgc compress -b16 < my_file > my_file.lzwgc`
Decompress:    `lzwgc decompress -b16 < my_file.lzwgc > my_file`
Debug:         `lzwgc debug -b16 < my_file > /dev/null`";

    let bits_arg = || arg!(-b --bits <N> "dictionary bit width, 9..=24").default_value(DEFAULT_BITS);

    let mut main_cmd = Command::new("lzwgc")
        .about("Streaming LZW compression with a garbage-collected, adaptive dictionary")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(
        Command::new("compress").arg(bits_arg()).about("compress stdin to stdout"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("decompress").arg(bits_arg()).about("decompress stdin to stdout"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("debug")
            .arg(bits_arg())
            .about("decompress stdin to stdout while checking encoder/decoder dictionaries stay in lockstep"),
    );

    let matches = main_cmd.get_matches();

    let parse_bits = |cmd: &clap::ArgMatches| -> Result<u32, Box<dyn std::error::Error>> {
        let raw = cmd.get_one::<String>("bits").expect(RCH);
        Ok(raw.parse::<u32>()?)
    };

    if let Some(cmd) = matches.subcommand_matches("compress") {
        let bits = parse_bits(cmd)?;
        let (read, wrote) = codec::compress(&mut stdin().lock(), &mut stdout().lock(), bits)?;
        log::info!("compressed {read} bytes into {wrote} bytes");
    }

    if let Some(cmd) = matches.subcommand_matches("decompress") {
        let bits = parse_bits(cmd)?;
        let (read, wrote) = codec::expand(&mut stdin().lock(), &mut stdout().lock(), bits)?;
        log::info!("expanded {read} bytes into {wrote} bytes");
    }

    if let Some(cmd) = matches.subcommand_matches("debug") {
        let bits = parse_bits(cmd)?;
        let divergences = codec::debug_roundtrip(&mut stdin().lock(), &mut stdout().lock(), bits)?;
        if divergences > 0 {
            eprintln!("{divergences} dictionary divergence(s) detected, see log output");
            std::process::exit(1);
        }
    }

    Ok(())
}
