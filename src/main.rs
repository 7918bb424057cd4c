// SPDX-License-Identifier: MPL-2.0
use spot_lens::app::{self, Flags};

const HELP: &str = "\
SpotLens

USAGE:
  spot_lens [OPTIONS] [SPOT_FILE]

OPTIONS:
  -h, --help              Print help
  --spots <FILE>          Spot file to display
  --config-dir <DIR>      Directory holding settings.toml
";

fn main() -> iced::Result {
    env_logger::init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(());
    }

    let spots_path: Option<String> = args.opt_value_from_str("--spots").unwrap_or_else(|err| {
        log::warn!("Ignoring --spots: {}", err);
        None
    });
    let config_dir: Option<String> =
        args.opt_value_from_str("--config-dir").unwrap_or_else(|err| {
            log::warn!("Ignoring --config-dir: {}", err);
            None
        });

    let flags = Flags {
        spots_path: spots_path.or_else(|| {
            args.finish()
                .into_iter()
                .next()
                .and_then(|s| s.into_string().ok())
        }),
        config_dir,
    };

    app::run(flags)
}
