use crate::domain::{DfConfig, DiskUsage, MonitorError};
use crate::infrastructure::command::{run_checked, CommandRunner};

pub(crate) const COMMAND: &str = "df";

/// Interroge `df` pour `device` et extrait les quatre champs d'usage.
pub(crate) fn query_usage<R: CommandRunner + ?Sized>(
    runner: &R,
    cfg: &DfConfig,
    device: &str,
) -> Result<DiskUsage, MonitorError> {
    let mut args = cfg.args.clone();
    args.push(device.to_string());
    let output = run_checked(runner, device, COMMAND, &cfg.program, &args)?;
    parse_df_output(&output.stdout).map_err(|reason| MonitorError::Parse {
        device: device.to_string(),
        command: COMMAND.to_string(),
        reason,
    })
}

/// Lit la deuxième ligne de la sortie de `df`.
///
/// Les colonnes sont repérées par l'en-tête (`Size`/`*-blocks`, `Used`,
/// `Avail`/`Available`, `Use%`/`Capacity`), quel que soit `--output`.
/// Sans en-tête reconnu : 4 colonnes telles quelles, sinon la première
/// (`Filesystem`) est sautée.
fn parse_df_output(output: &str) -> Result<DiskUsage, String> {
    let mut lines = output.trim_end().lines();
    let header = lines.next().unwrap_or_default();
    let line = lines
        .next()
        .ok_or_else(|| "missing data line".to_string())?;
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let fields: Vec<&str> = match header_columns(header) {
        Some(idx) => idx
            .iter()
            .map(|&i| {
                tokens
                    .get(i)
                    .copied()
                    .ok_or_else(|| format!("missing column {i} in {line:?}"))
            })
            .collect::<Result<_, _>>()?,
        None => match tokens.len() {
            4 => tokens.clone(),
            n if n >= 5 => tokens[1..5].to_vec(),
            n => return Err(format!("expected 4 usage fields, got {n}: {line:?}")),
        },
    };

    if !fields[3].ends_with('%') {
        return Err(format!("usage percent {:?} has no '%'", fields[3]));
    }
    Ok(DiskUsage {
        size: fields[0].to_string(),
        used: fields[1].to_string(),
        available: fields[2].to_string(),
        usage_percent: fields[3].to_string(),
    })
}

/// Positions de size/used/avail/pcent dans l'en-tête, si toutes y figurent.
fn header_columns(header: &str) -> Option<[usize; 4]> {
    // "Mounted on" est la seule colonne en deux mots
    let normalized = header.replace("Mounted on", "Mounted_on");
    let columns: Vec<&str> = normalized.split_whitespace().collect();

    let size = position(&columns, &["Size"])
        .or_else(|| columns.iter().position(|c| c.ends_with("-blocks")))?;
    Some([
        size,
        position(&columns, &["Used"])?,
        position(&columns, &["Avail", "Available"])?,
        position(&columns, &["Use%", "Capacity"])?,
    ])
}

fn position(columns: &[&str], names: &[&str]) -> Option<usize> {
    columns.iter().position(|c| names.contains(c))
}

#[cfg(any(test, feature = "internals"))]
pub fn parse_df_output_for_tests(output: &str) -> Result<DiskUsage, String> {
    parse_df_output(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::command::fake::ScriptedRunner;
    use proptest::prelude::*;

    #[test]
    fn parses_structured_output() {
        let out = " Size  Used Avail Use%\n  20G   12G  7.1G  63%\n";
        let du = parse_df_output(out).expect("df");
        assert_eq!(du.size, "20G");
        assert_eq!(du.used, "12G");
        assert_eq!(du.available, "7.1G");
        assert_eq!(du.usage_percent, "63%");
    }

    #[test]
    fn parses_classic_layout() {
        let out = "\
Filesystem      Size  Used Avail Use% Mounted on
/dev/sda1        98G   41G   52G  45% /
";
        let du = parse_df_output(out).expect("df");
        assert_eq!(
            du,
            DiskUsage {
                size: "98G".into(),
                used: "41G".into(),
                available: "52G".into(),
                usage_percent: "45%".into(),
            }
        );
    }

    #[test]
    fn columns_follow_the_header_with_target() {
        let out = " Size  Used Avail Use% Mounted on\n  20G   12G  7.1G  63% /\n";
        let du = parse_df_output(out).expect("df");
        assert_eq!(
            du,
            DiskUsage {
                size: "20G".into(),
                used: "12G".into(),
                available: "7.1G".into(),
                usage_percent: "63%".into(),
            }
        );
    }

    #[test]
    fn columns_follow_the_header_in_any_order() {
        let out = "Use% Avail Source Size Used\n 5% 90G /dev/sdb1 100G 5G\n";
        let du = parse_df_output(out).expect("df");
        assert_eq!(du.size, "100G");
        assert_eq!(du.used, "5G");
        assert_eq!(du.available, "90G");
        assert_eq!(du.usage_percent, "5%");
    }

    #[test]
    fn parses_posix_layout() {
        let out = "\
Filesystem     1024-blocks     Used Available Capacity Mounted on
/dev/sda1        102626232 42086440  55280564      44% /
";
        let du = parse_df_output(out).expect("df");
        assert_eq!(du.size, "102626232");
        assert_eq!(du.available, "55280564");
        assert_eq!(du.usage_percent, "44%");
    }

    #[test]
    fn rejects_percent_without_sign() {
        let err = parse_df_output("a b c d\n20G 12G 7.1G 63\n").unwrap_err();
        assert!(err.contains("no '%'"), "{err}");
    }

    #[test]
    fn rejects_truncated_data_line() {
        assert!(parse_df_output(" Size  Used Avail Use%\n  20G   12G\n").is_err());
    }

    #[test]
    fn rejects_header_only() {
        let err = parse_df_output("Filesystem Size Used Avail Use% Mounted on\n").unwrap_err();
        assert!(err.contains("missing data line"));
    }

    #[test]
    fn rejects_short_line() {
        assert!(parse_df_output("Size Used\n20G 12G\n").is_err());
    }

    #[test]
    fn query_usage_passes_device_last() {
        let runner = ScriptedRunner::default().ok(" Size  Used Avail Use%\n 1.0G  10M  990M   1%\n");
        let du = query_usage(&runner, &DfConfig::default(), "/dev/sdc1").expect("df");
        assert_eq!(du.usage_percent, "1%");
        assert_eq!(
            runner.calls.borrow()[0],
            ["df", "-h", "--output=size,used,avail,pcent", "/dev/sdc1"]
        );
    }

    #[test]
    fn query_usage_reports_parse_errors() {
        let runner = ScriptedRunner::default().ok("");
        let err = query_usage(&runner, &DfConfig::default(), "/dev/sdc1").unwrap_err();
        assert!(matches!(err, MonitorError::Parse { .. }));
        assert_eq!(err.device(), Some("/dev/sdc1"));
    }

    proptest! {
        #[test]
        fn fields_are_the_second_line_tokens(
            fields in prop::array::uniform3("[A-Za-z0-9.,]{1,8}"),
            pct in "[0-9]{1,3}%",
            header in "[a-z ]{0,30}",
        ) {
            let out = format!("{header}\n{} {} {} {pct}\n", fields[0], fields[1], fields[2]);
            let du = parse_df_output(&out).expect("parsed");
            prop_assert_eq!(&du.size, &fields[0]);
            prop_assert_eq!(&du.used, &fields[1]);
            prop_assert_eq!(&du.available, &fields[2]);
            prop_assert_eq!(&du.usage_percent, &pct);
        }

        #[test]
        fn parse_tolerates_garbage(data: Vec<u8>) {
            let text = String::from_utf8_lossy(&data);
            let _ = parse_df_output(&text);
        }
    }
}
