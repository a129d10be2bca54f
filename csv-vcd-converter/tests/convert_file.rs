// End-to-end conversions through real files
use csv_vcd_converter::{ConvertConfig, ConvertError, Converter, TimeUnit, ValuePolicy};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::{tempdir, NamedTempFile};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn write_csv(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn converter() -> Converter {
    Converter::new(
        ConvertConfig::new()
            .with_date("Thu Jan  1 00:00:00 1970")
            .with_time_unit(TimeUnit::from_sample_rate(1_000_000.0).unwrap()),
    )
}

#[test]
fn round_trip_scenario() {
    init_logging();
    let dir = tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        "capture.csv",
        "time,a,b\n0,0,0\n5,0,1\n10,0,1\n15,1,1\n",
    );
    let output = dir.path().join("capture.vcd");

    let stats = converter().convert_file(&input, &output).unwrap();
    assert_eq!(stats.signals, 2);
    assert_eq!(stats.rows, 4);
    assert_eq!(stats.change_blocks, 2);

    let expected = "\
$date
    Thu Jan  1 00:00:00 1970
$end
$version
    csv-vcd-converter
$end
$timescale
    1000ns
$end
$scope module capture $end
$var wire 1 ! a $end
$var wire 1 \" b $end
$upscope $end
$enddefinitions $end
$dumpvars
#0
0!
0\"
$end
#5
1\"
#15
1!
";
    assert_eq!(fs::read_to_string(&output).unwrap(), expected);
}

#[test]
fn var_lines_match_signal_count_with_distinct_symbols() {
    let dir = tempdir().unwrap();
    let names: Vec<String> = (0..94).map(|i| format!("s{}", i)).collect();
    let zeros = vec!["0"; 94].join(",");
    let input = write_csv(
        dir.path(),
        "wide.csv",
        &format!("time,{}\n0,{}\n", names.join(","), zeros),
    );
    let output = dir.path().join("wide.vcd");

    converter().convert_file(&input, &output).unwrap();
    let text = fs::read_to_string(&output).unwrap();

    let vars: Vec<&str> = text.lines().filter(|l| l.starts_with("$var")).collect();
    assert_eq!(vars.len(), 94);

    let symbols: HashSet<&str> = vars
        .iter()
        .map(|l| l.split_whitespace().nth(3).unwrap())
        .collect();
    assert_eq!(symbols.len(), 94);
    assert!(symbols.iter().all(|s| s.chars().count() == 1));
}

#[test]
fn initial_block_matches_first_row() {
    let dir = tempdir().unwrap();
    let input = write_csv(dir.path(), "init.csv", "t,x,y,z\n3,1,0,1\n4,1,0,1\n");
    let output = dir.path().join("init.vcd");

    converter().convert_file(&input, &output).unwrap();
    let text = fs::read_to_string(&output).unwrap();

    let dump = text.split("$dumpvars\n").nth(1).unwrap();
    let initial: Vec<&str> = dump.lines().take_while(|l| *l != "$end").collect();
    assert_eq!(initial, vec!["#0", "1!", "0\"", "1#"]);
    // Identical second row: nothing after the initial block
    assert!(text.ends_with("$dumpvars\n#0\n1!\n0\"\n1#\n$end\n"));
}

#[test]
fn single_signal_change_emits_one_value_line() {
    let dir = tempdir().unwrap();
    let input = write_csv(dir.path(), "one.csv", "time,a,b,c\n0,0,0,0\n9,0,0,1\n");
    let output = dir.path().join("one.vcd");

    converter().convert_file(&input, &output).unwrap();
    let text = fs::read_to_string(&output).unwrap();
    assert!(text.ends_with("$end\n#9\n1#\n"));
}

#[test]
fn capacity_exceeded_leaves_output_untouched() {
    let dir = tempdir().unwrap();
    let names: Vec<String> = (0..95).map(|i| format!("s{}", i)).collect();
    let zeros = vec!["0"; 95].join(",");
    let input = write_csv(
        dir.path(),
        "too_wide.csv",
        &format!("time,{}\n0,{}\n", names.join(","), zeros),
    );

    // Output does not exist yet
    let missing = dir.path().join("too_wide.vcd");
    let result = converter().convert_file(&input, &missing);
    assert!(matches!(result, Err(ConvertError::CapacityExceeded { .. })));
    assert!(!missing.exists());

    // Existing output keeps its previous content
    let mut existing = NamedTempFile::new_in(dir.path()).unwrap();
    existing.write_all(b"previous").unwrap();
    existing.flush().unwrap();
    let result = converter().convert_file(&input, existing.path());
    assert!(result.is_err());
    assert_eq!(fs::read_to_string(existing.path()).unwrap(), "previous");

    // No staged temp files left behind
    let entries = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 2);
}

#[test]
fn malformed_row_fails_without_publishing_output() {
    let dir = tempdir().unwrap();
    let input = write_csv(dir.path(), "short.csv", "time,a,b\n0,0,0\n5,1,1\n10,1\n");
    let output = dir.path().join("short.vcd");

    let result = converter().convert_file(&input, &output);
    match result {
        Err(ConvertError::MalformedRow { line, .. }) => assert_eq!(line, 4),
        other => panic!("expected MalformedRow, got {:?}", other),
    }
    assert!(!output.exists());
}

#[test]
fn non_atomic_output_streams_directly() {
    let dir = tempdir().unwrap();
    let input = write_csv(dir.path(), "direct.csv", "time,a\n0,0\n1,1\n2,x\n");
    let output = dir.path().join("direct.vcd");

    let converter = Converter::new(ConvertConfig::new().with_atomic_output(false));
    assert!(converter.convert_file(&input, &output).is_err());

    // Partial output is allowed in this mode
    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("#1\n1!\n"));
}

#[test]
fn reject_non_binary_values() {
    let dir = tempdir().unwrap();
    let input = write_csv(dir.path(), "levels.csv", "time,a\n0,0\n1,2\n");
    let output = dir.path().join("levels.vcd");

    let strict = Converter::new(ConvertConfig::new().with_value_policy(ValuePolicy::RejectNonBinary));
    assert!(matches!(
        strict.convert_file(&input, &output),
        Err(ConvertError::MalformedSample { value: 2, .. })
    ));

    converter().convert_file(&input, &output).unwrap();
    assert!(fs::read_to_string(&output).unwrap().ends_with("#1\n2!\n"));
}

#[test]
fn output_path_must_be_a_regular_file() {
    let dir = tempdir().unwrap();
    let input = write_csv(dir.path(), "in.csv", "time,a\n0,0\n");
    let result = converter().convert_file(&input, dir.path());
    assert!(matches!(result, Err(ConvertError::OutputPathInvalid(_))));
}

#[test]
fn input_directory_is_not_found() {
    let dir = tempdir().unwrap();
    let result = converter().convert_file(dir.path(), &dir.path().join("out.vcd"));
    assert!(matches!(result, Err(ConvertError::InputNotFound(_))));
}

#[test]
fn successful_overwrite_replaces_content() {
    let dir = tempdir().unwrap();
    let input = write_csv(dir.path(), "again.csv", "time,a\n0,0\n2,1\n");
    let output = dir.path().join("again.vcd");
    fs::write(&output, "stale contents").unwrap();

    converter().convert_file(&input, &output).unwrap();
    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("$date\n"));
    assert!(text.ends_with("#2\n1!\n"));
    assert!(!text.contains("stale"));
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::os::unix::fs::{symlink, PermissionsExt};

    fn mode(path: &Path) -> u32 {
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[test]
    fn overwrite_keeps_existing_permissions() {
        let dir = tempdir().unwrap();
        let input = write_csv(dir.path(), "perm.csv", "time,a\n0,0\n1,1\n");
        let output = dir.path().join("perm.vcd");
        fs::write(&output, "old").unwrap();
        fs::set_permissions(&output, fs::Permissions::from_mode(0o644)).unwrap();

        converter().convert_file(&input, &output).unwrap();
        assert_eq!(mode(&output), 0o644);
        assert!(fs::read_to_string(&output).unwrap().ends_with("#1\n1!\n"));

        fs::set_permissions(&output, fs::Permissions::from_mode(0o640)).unwrap();
        converter().convert_file(&input, &output).unwrap();
        assert_eq!(mode(&output), 0o640);
    }

    #[test]
    fn new_output_gets_regular_create_permissions() {
        let dir = tempdir().unwrap();
        let input = write_csv(dir.path(), "fresh.csv", "time,a\n0,0\n");

        // Same umask applies to both files
        let reference = dir.path().join("reference");
        fs::File::create(&reference).unwrap();

        let output = dir.path().join("fresh.vcd");
        converter().convert_file(&input, &output).unwrap();
        assert_eq!(mode(&output), mode(&reference));
    }

    #[test]
    fn symlinked_output_is_written_through() {
        let dir = tempdir().unwrap();
        let input = write_csv(dir.path(), "linked.csv", "time,a\n0,1\n3,0\n");
        let target = dir.path().join("target.vcd");
        fs::write(&target, "old").unwrap();
        let link = dir.path().join("link.vcd");
        symlink(&target, &link).unwrap();

        converter().convert_file(&input, &link).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert!(fs::read_to_string(&target).unwrap().ends_with("#3\n0!\n"));
    }
}
