//! 主机上的辅助工具：解析内核返回值、组合/拆分打开标志、列出ABI常量

mod logging;

use clap::{App, Arg, ArgMatches, SubCommand};
use iofilemgr::consts::*;
use iofilemgr::{Error, OpenFlags};
use log::{debug, info};
use std::process;

fn main() {
    let matches = App::new("sceio")
        .version("0.1.0")
        .about("Helper for the kernel file I/O manager ABI")
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Raise the log level (repeatable)"),
        )
        .subcommand(
            SubCommand::with_name("decode")
                .about("Decode kernel result codes")
                .arg(
                    Arg::with_name("code")
                        .required(true)
                        .multiple(true)
                        .allow_hyphen_values(true)
                        .help("Result code, hex (0x80010018) or decimal"),
                ),
        )
        .subcommand(
            SubCommand::with_name("flags")
                .about("Compose open flags from names, or split a value into names")
                .arg(
                    Arg::with_name("decode")
                        .short("d")
                        .long("decode")
                        .takes_value(true)
                        .help("Flag value to split"),
                )
                .arg(
                    Arg::with_name("name")
                        .multiple(true)
                        .help("Flag names, e.g. wronly creat trunc"),
                ),
        )
        .subcommand(SubCommand::with_name("consts").about("Print every ABI constant"))
        .get_matches();

    logging::init(matches.occurrences_of("verbose"));

    let result = match matches.subcommand() {
        ("decode", Some(sub)) => decode(sub),
        ("flags", Some(sub)) => flags(sub),
        ("consts", Some(_)) => {
            print_consts();
            Ok(())
        }
        _ => Err(String::from("no subcommand given, see --help")),
    };
    if let Err(msg) = result {
        eprintln!("sceio: {}", msg);
        process::exit(1);
    }
}

// 支持十六进制（0x前缀）、十进制和负数
fn parse_value(text: &str) -> Result<u32, String> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text
            .parse::<i64>()
            .ok()
            .filter(|v| *v >= i32::MIN as i64 && *v <= u32::MAX as i64)
            .map(|v| v as u32),
    };
    parsed.ok_or_else(|| format!("invalid value {:?}", text))
}

fn describe_code(code: u32) -> String {
    if (code as i32) >= 0 {
        format!("{:#010x}: success (value {})", code, code)
    } else {
        format!("{:#010x}: {}", code, Error::from_code(code as i32))
    }
}

fn decode(matches: &ArgMatches) -> Result<(), String> {
    for text in matches.values_of("code").into_iter().flatten() {
        let code = parse_value(text)?;
        debug!("decode {:?} -> {:#x}", text, code);
        println!("{}", describe_code(code));
    }
    Ok(())
}

fn compose_flags<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<OpenFlags, String> {
    names.into_iter().try_fold(OpenFlags::empty(), |acc, name| {
        OpenFlags::from_name(name)
            .map(|flag| acc | flag)
            .ok_or_else(|| format!("unknown open flag {:?}", name))
    })
}

fn flags(matches: &ArgMatches) -> Result<(), String> {
    if let Some(text) = matches.value_of("decode") {
        let value = parse_value(text)?;
        let known = OpenFlags::from_bits_truncate(value);
        let unknown = value & !OpenFlags::all().bits();
        let mut line = known.names().join(" | ");
        if unknown != 0 {
            if !line.is_empty() {
                line.push_str(" | ");
            }
            line.push_str(&format!("{:#x}", unknown));
        }
        println!("{:#010x}: {}", value, line);
        return Ok(());
    }
    let flags = compose_flags(matches.values_of("name").into_iter().flatten())?;
    if flags.has_reserved() {
        info!("reserved flags set: {:?}", flags & OpenFlags::RESERVED);
    }
    println!("{:#010x}", flags.bits());
    Ok(())
}

fn print_table(title: &str, entries: &[(&str, i64)]) {
    println!("{}", title);
    for (name, value) in entries {
        println!("  {:<28} {:#x}", name, value);
    }
}

fn print_consts() {
    print_table(
        "device types",
        &[
            ("SCE_D_TYPE_NULL", SCE_D_TYPE_NULL as i64),
            ("SCE_D_TYPE_CHAR", SCE_D_TYPE_CHAR as i64),
            ("SCE_D_TYPE_BLOCK", SCE_D_TYPE_BLOCK as i64),
            ("SCE_D_TYPE_FS", SCE_D_TYPE_FS as i64),
            ("SCE_D_TYPE_ALIAS", SCE_D_TYPE_ALIAS as i64),
            ("SCE_D_TYPE_MOUNTPT", SCE_D_TYPE_MOUNTPT as i64),
        ],
    );
    print_table(
        "file flags",
        &[
            ("SCE_FREAD", SCE_FREAD as i64),
            ("SCE_FWRITE", SCE_FWRITE as i64),
            ("SCE_FNBLOCK", SCE_FNBLOCK as i64),
            ("SCE_FDIRO", SCE_FDIRO as i64),
            ("SCE_FRLOCK", SCE_FRLOCK as i64),
            ("SCE_FWLOCK", SCE_FWLOCK as i64),
            ("SCE_FAPPEND", SCE_FAPPEND as i64),
            ("SCE_FCREAT", SCE_FCREAT as i64),
            ("SCE_FTRUNC", SCE_FTRUNC as i64),
            ("SCE_EXCL", SCE_EXCL as i64),
            ("SCE_FSCAN", SCE_FSCAN as i64),
            ("SCE_FRCOM", SCE_FRCOM as i64),
            ("SCE_FNBUF", SCE_FNBUF as i64),
            ("SCE_FASYNC", SCE_FASYNC as i64),
            ("SCE_FFDEXCL", SCE_FFDEXCL as i64),
            ("SCE_FPWLOCK", SCE_FPWLOCK as i64),
            ("SCE_FGAMEDATA", SCE_FGAMEDATA as i64),
        ],
    );
    print_table(
        "open flags",
        &[
            ("SCE_O_RDONLY", SCE_O_RDONLY as i64),
            ("SCE_O_WRONLY", SCE_O_WRONLY as i64),
            ("SCE_O_RDWR", SCE_O_RDWR as i64),
            ("SCE_O_NBLOCK", SCE_O_NBLOCK as i64),
            ("SCE_O_APPEND", SCE_O_APPEND as i64),
            ("SCE_O_CREAT", SCE_O_CREAT as i64),
            ("SCE_O_TRUNC", SCE_O_TRUNC as i64),
            ("SCE_O_EXCL", SCE_O_EXCL as i64),
            ("SCE_O_NOBUF", SCE_O_NOBUF as i64),
            ("SCE_O_NOWAIT", SCE_O_NOWAIT as i64),
            ("SCE_O_FDEXCL", SCE_O_FDEXCL as i64),
            ("SCE_O_PWLOCK", SCE_O_PWLOCK as i64),
            ("SCE_O_FGAMEDATA", SCE_O_FGAMEDATA as i64),
        ],
    );
    print_table(
        "seek modes",
        &[
            ("SCE_SEEK_SET", SCE_SEEK_SET as i64),
            ("SCE_SEEK_CUR", SCE_SEEK_CUR as i64),
            ("SCE_SEEK_END", SCE_SEEK_END as i64),
        ],
    );
    print_table(
        "limits",
        &[
            ("SCE_IO_MAX_PATH_BUFFER_SIZE", SCE_IO_MAX_PATH_BUFFER_SIZE as i64),
            ("SCE_IO_MAX_PATH_LENGTH", SCE_IO_MAX_PATH_LENGTH as i64),
        ],
    );
    print_table(
        "devctl / result codes",
        &[
            ("SCE_IO_DEVCTL_GET_DEV_INFO", SCE_IO_DEVCTL_GET_DEV_INFO as i64),
            ("SCE_ERROR_ERRNO_BASE", SCE_ERROR_ERRNO_BASE as i64),
            ("SCE_KERNEL_ERROR_UNSUP", SCE_KERNEL_ERROR_UNSUP as i64),
        ],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_decimal_and_negative() {
        assert_eq!(parse_value("0x80010018"), Ok(0x8001_0018));
        assert_eq!(parse_value("512"), Ok(512));
        assert_eq!(parse_value("-2147352572"), Ok(0x8002_0004));
        assert!(parse_value("0xZZ").is_err());
        assert!(parse_value("99999999999").is_err());
    }

    #[test]
    fn describe_known_codes() {
        assert_eq!(
            describe_code(0x8001_0018),
            "0x80010018: EMFILE: too many open files (0x80010018)"
        );
        assert_eq!(
            describe_code(0x8002_0004),
            "0x80020004: unsupported (0x80020004)"
        );
        assert_eq!(describe_code(3), "0x00000003: success (value 3)");
    }

    #[test]
    fn compose_by_name() {
        let flags = compose_flags(vec!["wronly", "creat", "SCE_O_TRUNC"]).unwrap();
        assert_eq!(flags.bits(), 0x602);
        assert!(compose_flags(vec!["bogus"]).is_err());
    }
}
