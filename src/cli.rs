// Command-line front end for the varint codec and record files.
//
// Subcommands map one-to-one onto library calls; every command writes its
// primary output to stdout and diagnostics to stderr.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use log::debug;

use crate::bytes;
use crate::codec::{CodecError, varint};
use crate::io as record;

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Zig-zag varint encoder/decoder and integer-list record tool.
#[derive(Parser, Debug)]
#[command(
    name = "varpack",
    version,
    about = "Zig-zag varint encoder/decoder",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Force overwrite existing output files.
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON to stderr.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Encode integers as zig-zag varints (hex, one per line).
    Encode(ValuesArgs),
    /// Decode a hex string of concatenated zig-zag varints.
    Decode(DecodeArgs),
    /// Print the encoded size of each integer.
    Size(ValuesArgs),
    /// Write integers to a record file.
    Pack(PackArgs),
    /// Print the integers stored in a record file.
    Unpack(UnpackArgs),
    /// Print build/configuration details.
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum WidthArg {
    #[value(name = "32")]
    W32,
    #[value(name = "64")]
    W64,
}

#[derive(Args, Debug)]
struct ValuesArgs {
    /// Integer width.
    #[arg(long, short = 'w', value_enum, default_value_t = WidthArg::W64)]
    width: WidthArg,

    /// Integers to process.
    #[arg(required = true, allow_negative_numbers = true)]
    values: Vec<i64>,
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// Integer width.
    #[arg(long, short = 'w', value_enum, default_value_t = WidthArg::W64)]
    width: WidthArg,

    /// Hex-encoded varints (whitespace allowed).
    hex: String,
}

#[derive(Args, Debug)]
struct PackArgs {
    /// Record file to write.
    #[arg(long, short = 'o', value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Integers to store.
    #[arg(allow_negative_numbers = true)]
    values: Vec<i64>,
}

#[derive(Args, Debug)]
struct UnpackArgs {
    /// Record file to read.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,
}

// ---------------------------------------------------------------------------
// Resolved options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Encode,
    Decode,
    Size,
    Pack,
    Unpack,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Width {
    Bits32,
    Bits64,
}

impl Width {
    fn bits(self) -> u32 {
        match self {
            Width::Bits32 => 32,
            Width::Bits64 => 64,
        }
    }
}

impl From<WidthArg> for Width {
    fn from(w: WidthArg) -> Self {
        match w {
            WidthArg::W32 => Width::Bits32,
            WidthArg::W64 => Width::Bits64,
        }
    }
}

#[derive(Debug)]
struct Options {
    command: Command,
    width: Width,
    values: Vec<i64>,
    hex_input: Option<String>,
    input_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
    force: bool,
    quiet: bool,
    verbose: u8,
    json_output: bool,
}

fn resolve_options(cli: Cli) -> Options {
    let mut opts = Options {
        command: Command::Config,
        width: Width::Bits64,
        values: Vec::new(),
        hex_input: None,
        input_file: None,
        output_file: None,
        force: cli.force,
        quiet: cli.quiet,
        verbose: cli.verbose,
        json_output: cli.json_output,
    };

    match cli.command {
        Cmd::Encode(args) => {
            opts.command = Command::Encode;
            opts.width = args.width.into();
            opts.values = args.values;
        }
        Cmd::Size(args) => {
            opts.command = Command::Size;
            opts.width = args.width.into();
            opts.values = args.values;
        }
        Cmd::Decode(args) => {
            opts.command = Command::Decode;
            opts.width = args.width.into();
            opts.hex_input = Some(args.hex);
        }
        Cmd::Pack(args) => {
            opts.command = Command::Pack;
            opts.output_file = Some(args.output);
            opts.values = args.values;
        }
        Cmd::Unpack(args) => {
            opts.command = Command::Unpack;
            opts.input_file = Some(args.input);
        }
        Cmd::Config => {}
    }

    opts
}

// ---------------------------------------------------------------------------
// Width-dispatched codec calls
// ---------------------------------------------------------------------------

fn narrow(value: i64, width: Width) -> Result<i64, String> {
    match width {
        Width::Bits64 => Ok(value),
        Width::Bits32 => i32::try_from(value)
            .map(i64::from)
            .map_err(|_| format!("value {value} does not fit in 32 bits")),
    }
}

fn encode_value(value: i64, width: Width) -> Result<Vec<u8>, String> {
    let value = narrow(value, width)?;
    Ok(match width {
        // Narrowed above.
        Width::Bits32 => varint::encode_varint(value as i32),
        Width::Bits64 => varint::encode_varlong(value),
    })
}

fn size_value(value: i64, width: Width) -> Result<usize, String> {
    let value = narrow(value, width)?;
    Ok(match width {
        Width::Bits32 => varint::size_of_varint(value as i32),
        Width::Bits64 => varint::size_of_varlong(value),
    })
}

fn decode_value(data: &[u8], width: Width) -> Result<(i64, usize), CodecError> {
    match width {
        Width::Bits32 => varint::decode_varint(data).map(|(v, n)| (i64::from(v), n)),
        Width::Bits64 => varint::decode_varlong(data),
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_encode<W: Write>(opts: &Options, out: &mut W) -> i32 {
    debug!(
        "encode: {} values at {}-bit width",
        opts.values.len(),
        opts.width.bits()
    );
    let mut total = 0usize;
    for &value in &opts.values {
        let encoded = match encode_value(value, opts.width) {
            Ok(b) => b,
            Err(e) => {
                eprintln!("varpack: encode: {e}");
                return 1;
            }
        };
        total += encoded.len();
        if let Err(e) = writeln!(out, "{}", bytes::to_hex(&encoded)) {
            eprintln!("varpack: write error: {e}");
            return 1;
        }
    }

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "varpack: encoded {} values into {total} bytes",
            opts.values.len()
        );
    }

    if opts.json_output {
        let json = serde_json::json!({
            "command": "encode",
            "width": opts.width.bits(),
            "values": opts.values.len(),
            "bytes": total,
        });
        eprintln!("{json:#}");
    }

    0
}

fn cmd_decode<W: Write>(opts: &Options, out: &mut W) -> i32 {
    let hex = opts.hex_input.as_deref().unwrap_or_default();
    let data = match bytes::from_hex(hex) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("varpack: decode: {e}");
            return 1;
        }
    };
    debug!(
        "decode: {} bytes at {}-bit width",
        data.len(),
        opts.width.bits()
    );

    let mut pos = 0usize;
    let mut count = 0usize;
    while pos < data.len() {
        let (value, len) = match decode_value(&data[pos..], opts.width) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("varpack: decode error at byte {pos}: {e}");
                return 1;
            }
        };
        if let Err(e) = writeln!(out, "{value}") {
            eprintln!("varpack: write error: {e}");
            return 1;
        }
        pos += len;
        count += 1;
    }

    if opts.verbose > 0 && !opts.quiet {
        eprintln!("varpack: decoded {count} values from {pos} bytes");
    }

    if opts.json_output {
        let json = serde_json::json!({
            "command": "decode",
            "width": opts.width.bits(),
            "values": count,
            "bytes": pos,
        });
        eprintln!("{json:#}");
    }

    0
}

fn cmd_size<W: Write>(opts: &Options, out: &mut W) -> i32 {
    for &value in &opts.values {
        let size = match size_value(value, opts.width) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("varpack: size: {e}");
                return 1;
            }
        };
        if let Err(e) = writeln!(out, "{size}") {
            eprintln!("varpack: write error: {e}");
            return 1;
        }
    }
    0
}

fn cmd_pack(opts: &Options) -> i32 {
    let Some(path) = opts.output_file.as_ref() else {
        eprintln!("varpack: pack: no output file");
        return 1;
    };
    if path.exists() && !opts.force {
        eprintln!(
            "varpack: output file exists, use -f to overwrite: {}",
            path.display()
        );
        return 1;
    }

    let stats = match record::write_record_file(path, &opts.values) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("varpack: pack: {}: {e}", path.display());
            return 1;
        }
    };

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "varpack: pack: {} values, {} bytes",
            stats.values, stats.bytes
        );
    }

    if opts.json_output {
        let json = serde_json::json!({
            "command": "pack",
            "values": stats.values,
            "bytes": stats.bytes,
        });
        eprintln!("{json:#}");
    }

    0
}

fn cmd_unpack<W: Write>(opts: &Options, out: &mut W) -> i32 {
    let Some(path) = opts.input_file.as_ref() else {
        eprintln!("varpack: unpack: no input file");
        return 1;
    };

    let values = match record::read_record_file(path) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("varpack: unpack: {}: {e}", path.display());
            return 1;
        }
    };

    for value in &values {
        if let Err(e) = writeln!(out, "{value}") {
            eprintln!("varpack: write error: {e}");
            return 1;
        }
    }

    if opts.json_output {
        let json = serde_json::json!({
            "command": "unpack",
            "values": values.len(),
        });
        eprintln!("{json:#}");
    }

    0
}

fn cmd_config<W: Write>(out: &mut W) -> i32 {
    let lines = [
        format!("varpack {}", env!("CARGO_PKG_VERSION")),
        format!("MAX_GROUPS_32={}", varint::MAX_GROUPS_32),
        format!("MAX_GROUPS_64={}", varint::MAX_GROUPS_64),
        format!("fuzzing={}", cfg!(feature = "fuzzing")),
    ];
    for line in lines {
        if let Err(e) = writeln!(out, "{line}") {
            eprintln!("varpack: write error: {e}");
            return 1;
        }
    }
    0
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn dispatch<W: Write>(opts: &Options, out: &mut W) -> i32 {
    match opts.command {
        Command::Encode => cmd_encode(opts, out),
        Command::Decode => cmd_decode(opts, out),
        Command::Size => cmd_size(opts, out),
        Command::Pack => cmd_pack(opts),
        Command::Unpack => cmd_unpack(opts, out),
        Command::Config => cmd_config(out),
    }
}

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();
    let opts = resolve_options(cli);

    let mut out = BufWriter::new(io::stdout().lock());
    let mut exit_code = dispatch(&opts, &mut out);
    if let Err(e) = out.flush() {
        eprintln!("varpack: write flush error: {e}");
        exit_code = 1;
    }

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_opts(args: &[&str]) -> Options {
        let argv: Vec<String> = std::iter::once("varpack".to_string())
            .chain(args.iter().map(|s| s.to_string()))
            .collect();
        let cli = Cli::try_parse_from(argv).expect("cli parse failed");
        resolve_options(cli)
    }

    fn run_to_string(args: &[&str]) -> (i32, String) {
        let opts = parse_opts(args);
        let mut out = Vec::new();
        let code = dispatch(&opts, &mut out);
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn encode_subcommand_maps_correctly() {
        let opts = parse_opts(&["encode", "--width", "32", "1", "-65", "300"]);
        assert_eq!(opts.command, Command::Encode);
        assert_eq!(opts.width, Width::Bits32);
        assert_eq!(opts.values, vec![1, -65, 300]);
    }

    #[test]
    fn width_defaults_to_64() {
        assert_eq!(parse_opts(&["size", "5"]).width, Width::Bits64);
        assert_eq!(parse_opts(&["decode", "00"]).width, Width::Bits64);
    }

    #[test]
    fn encode_requires_values() {
        let argv = ["varpack", "encode"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn pack_and_unpack_map() {
        let opts = parse_opts(&["-f", "pack", "--output", "out.vp", "1", "-2"]);
        assert_eq!(opts.command, Command::Pack);
        assert!(opts.force);
        assert_eq!(opts.output_file, Some(PathBuf::from("out.vp")));
        assert_eq!(opts.values, vec![1, -2]);

        let opts = parse_opts(&["unpack", "in.vp"]);
        assert_eq!(opts.command, Command::Unpack);
        assert_eq!(opts.input_file, Some(PathBuf::from("in.vp")));
    }

    #[test]
    fn encode_prints_hex() {
        let (code, out) = run_to_string(&["encode", "0", "-1", "-65", "150"]);
        assert_eq!(code, 0);
        assert_eq!(out, "00\n01\n8101\nac02\n");
    }

    #[test]
    fn encode_rejects_out_of_range_32() {
        let (code, out) = run_to_string(&["encode", "-w", "32", "4294967296"]);
        assert_eq!(code, 1);
        assert!(out.is_empty());
    }

    #[test]
    fn decode_prints_values() {
        let (code, out) = run_to_string(&["decode", "-w", "32", "00 01 8101 ac02"]);
        assert_eq!(code, 0);
        assert_eq!(out, "0\n-1\n-65\n150\n");
    }

    #[test]
    fn decode_rejects_malformed() {
        let (code, _) = run_to_string(&["decode", "-w", "32", "ffffffffffff"]);
        assert_eq!(code, 1);
        let (code, _) = run_to_string(&["decode", "80"]);
        assert_eq!(code, 1);
        let (code, _) = run_to_string(&["decode", "zz"]);
        assert_eq!(code, 1);
    }

    #[test]
    fn size_prints_lengths() {
        let (code, out) = run_to_string(&["size", "-w", "32", "63", "64", "-2147483648"]);
        assert_eq!(code, 0);
        assert_eq!(out, "1\n2\n5\n");
    }

    #[test]
    fn config_lists_limits() {
        let (code, out) = run_to_string(&["config"]);
        assert_eq!(code, 0);
        assert!(out.contains("MAX_GROUPS_32=5"));
        assert!(out.contains("MAX_GROUPS_64=10"));
    }
}
