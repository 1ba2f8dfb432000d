//! CLI commands
//!
//! `minter status` reports endpoint health and contract state.
//! `minter mint <quantity> [--watch]` connects a wallet and submits a mint.

mod mint;
mod status;

pub use mint::mint;
pub use status::status;

pub const USAGE: &str = "usage: minter status | minter mint <quantity> [--watch]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Status,
    Mint { quantity: i64, watch: bool },
}

/// Parse arguments following the program name
pub fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut iter = args.iter().map(String::as_str);
    match iter.next() {
        None | Some("status") => Ok(Command::Status),
        Some("mint") => {
            let raw = iter
                .next()
                .ok_or_else(|| "mint requires a quantity".to_string())?;
            let quantity = raw
                .parse::<i64>()
                .map_err(|_| format!("invalid quantity '{}'", raw))?;

            let mut watch = false;
            for flag in iter {
                match flag {
                    "--watch" => watch = true,
                    other => return Err(format!("unknown flag '{}'", other)),
                }
            }
            Ok(Command::Mint { quantity, watch })
        }
        Some(other) => Err(format!("unknown command '{}'", other)),
    }
}
