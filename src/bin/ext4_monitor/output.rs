use crate::cli_opts::Opts;
use anyhow::Result;
use ext4_monitor::{render_json, render_summary, JsonStyle, Report};

fn json_style(opts: &Opts) -> JsonStyle {
    if opts.compact {
        JsonStyle::Compact
    } else {
        JsonStyle::Pretty
    }
}

/// Écrit le rapport sur stdout (JSON par défaut, tableau avec --summary).
pub(crate) fn emit(report: &Report, opts: &Opts) -> Result<()> {
    if opts.summary {
        print!("{}", render_summary(report));
    } else {
        println!("{}", render_json(report, json_style(opts))?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn compact_flag_selects_single_line_json() {
        let opts = Opts::try_parse_from(["ext4-monitor", "--compact"]).unwrap();
        assert_eq!(json_style(&opts), JsonStyle::Compact);
        let opts = Opts::try_parse_from(["ext4-monitor"]).unwrap();
        assert_eq!(json_style(&opts), JsonStyle::Pretty);
    }
}
