use crate::app::cli::{help_text, parse_cli_verb, split_global_options, CliVerb};

pub mod system;
pub mod worker;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    let (options, rest) = split_global_options(&args)?;
    if rest.is_empty() {
        return Ok(help_text());
    }

    match parse_cli_verb(rest[0].as_str()) {
        CliVerb::Check => system::cmd_check(&options),
        CliVerb::Submit => system::cmd_submit(&options),
        CliVerb::Run => system::cmd_run(&options, &rest[1..]),
        CliVerb::Kwargs => worker::cmd_kwargs(&rest[1..]),
        CliVerb::Rank => worker::cmd_rank(),
        CliVerb::Nproc => worker::cmd_nproc(),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(format!("unknown command `{}`", rest[0])),
    }
}
