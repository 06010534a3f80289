/// Command-line parser for pgpdump.

use clap::{App, Arg};

pub fn build() -> App<'static, 'static> {
    configure(App::new("pgpdump"))
}

/// Defines the CLI.
pub fn configure(app: App<'static, 'static>) -> App<'static, 'static> {
    app
        .version(env!("CARGO_PKG_VERSION"))
        .about("Dumps the structure of OpenPGP data.  The input may be \
                ASCII armored or binary.")
        .arg(Arg::with_name("input")
             .value_name("FILE")
             .help("Sets the input file to use (default: stdin)"))
        .arg(Arg::with_name("output")
             .short("o").long("output").value_name("FILE")
             .help("Sets the output file to use"))
        .arg(Arg::with_name("force")
             .short("f").long("force")
             .help("Overwrite existing files"))
        .arg(Arg::with_name("armor")
             .short("a").long("armor")
             .help("Requires ASCII armored input"))
        .arg(Arg::with_name("debug")
             .short("d").long("debug")
             .help("Dumps packet bodies and the raw bytes of every field"))
        .arg(Arg::with_name("gdump")
             .short("g").long("gdump")
             .help("Dumps bytes in rows of 16"))
        .arg(Arg::with_name("int")
             .short("i").long("int")
             .help("Dumps multi-precision integers"))
        .arg(Arg::with_name("literal")
             .short("l").long("literal")
             .help("Dumps the content of literal data packets"))
        .arg(Arg::with_name("marker")
             .short("m").long("marker")
             .help("Dumps the content of marker packets"))
        .arg(Arg::with_name("private")
             .short("p").long("private")
             .help("Dumps private and experimental subpackets"))
        .arg(Arg::with_name("utc")
             .short("u").long("utc")
             .help("Shows times in UTC"))
        .arg(Arg::with_name("json")
             .short("j").long("json")
             .conflicts_with("toml")
             .help("Emits JSON"))
        .arg(Arg::with_name("toml")
             .short("t").long("toml")
             .help("Emits TOML"))
        .arg(Arg::with_name("indent")
             .long("indent").value_name("N")
             .requires("json")
             .help("Indents JSON output by N spaces (0: compact)"))
}
