use std::path::Path;
use std::process::Command;

use agemix::io::matrix_out::write_matrix_csv;
use agemix::model::age_group::parse_groups;
use agemix::{format_matrix, AgeMixing, MixingConfig, MixingMatrix};

// Four single-year ages, a quarter of the population each.
const CENSUS: &str = "\
SUMLEV,REGION,SEX,AGE,CENSUS2010POP,POPESTIMATE2015
0,0,0,0,1,2
0,0,0,1,1,2
0,0,0,2,1,2
0,0,0,3,1,2
0,0,0,999,4,8
0,0,1,0,1,1
0,0,1,999,2,4
";

const MIXING: &str = "\
Age group,2-3,0-1
0-1,8,4
2-3,16,8
";

fn write_inputs(dir: &Path) -> MixingConfig {
    let mixing_path = dir.join("Age-Mixing.csv");
    let population_path = dir.join("US-Age-Sex-Distribution.csv");
    std::fs::write(&mixing_path, MIXING).expect("write mixing csv");
    std::fs::write(&population_path, CENSUS).expect("write census csv");
    MixingConfig {
        mixing_path,
        population_path,
        ..MixingConfig::default()
    }
}

#[test]
fn load_scale_and_format() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let cfg = write_inputs(tmp.path());
    let mixing = AgeMixing::load(&cfg).expect("load inputs");

    insta::assert_snapshot!(format_matrix(mixing.scaled()).unwrap(), @r"
    Age group,0-1,2-3
    0-1,1,2
    2-3,2,4
    ");

    let whole = mixing.new_matrix(&parse_groups(&["0-3"]).unwrap()).unwrap();
    insta::assert_snapshot!(format_matrix(&whole).unwrap(), @r"
    Age group,0-3
    0-3,9
    ");
}

#[test]
fn single_cell_formats_to_two_lines() {
    let m = MixingMatrix::new(parse_groups(&["5-10"]).unwrap(), vec![0.042]).unwrap();
    let out = format_matrix(&m).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines, vec!["Age group,5-10", "5-10,0.042"]);
}

#[test]
fn written_file_round_trips_through_loader() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let cfg = write_inputs(tmp.path());
    let mixing = AgeMixing::load(&cfg).expect("load inputs");

    let out_path = tmp.path().join("rebinned.csv");
    write_matrix_csv(&out_path, mixing.scaled()).expect("write output");
    let reloaded = agemix::io::contact::load_mixing_matrix_csv(&out_path).expect("reload");
    // written sorted by lower bound, so only the cells are compared
    assert_eq!(reloaded.len(), mixing.scaled().len());
    for (row, col, v) in mixing.scaled().cells() {
        assert_eq!(reloaded.get(row.label(), col.label()), Some(v));
    }
}

#[test]
fn binary_prints_rebinned_table() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let cfg = write_inputs(tmp.path());

    let out = Command::new(env!("CARGO_BIN_EXE_agemix"))
        .arg("--mixing")
        .arg(&cfg.mixing_path)
        .arg("--population")
        .arg(&cfg.population_path)
        .args(["--groups", "2-3,0-1"])
        .output()
        .expect("run agemix");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    insta::assert_snapshot!(String::from_utf8(out.stdout).unwrap(), @r"
    Age group,0-1,2-3
    0-1,1,2
    2-3,2,4
    ");
}

#[test]
fn binary_reads_config_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let cfg = write_inputs(tmp.path());
    let cfg = MixingConfig {
        estimate_column: "POPESTIMATE2015".to_string(),
        target_groups: vec!["0-3".to_string()],
        ..cfg
    };
    let cfg_path = tmp.path().join("agemix.toml");
    std::fs::write(&cfg_path, toml::to_string(&cfg).expect("serialize config")).expect("write config");

    let out = Command::new(env!("CARGO_BIN_EXE_agemix"))
        .arg("--config")
        .arg(&cfg_path)
        .output()
        .expect("run agemix");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "Age group,0-3\n0-3,9\n");
}

#[test]
fn strict_mode_fails_on_gaps() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let cfg = write_inputs(tmp.path());

    let run = |strict: bool| {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_agemix"));
        cmd.arg("--mixing")
            .arg(&cfg.mixing_path)
            .arg("--population")
            .arg(&cfg.population_path)
            .args(["--groups", "0-1"]);
        if strict {
            cmd.arg("--strict");
        }
        cmd.output().expect("run agemix")
    };

    let lenient = run(false);
    assert!(lenient.status.success());
    assert_eq!(String::from_utf8(lenient.stdout).unwrap(), "Age group,0-1\n0-1,1\n");

    let strict = run(true);
    assert!(!strict.status.success());
    assert!(String::from_utf8_lossy(&strict.stderr).contains("do not tile"));
}

#[test]
fn missing_input_file_fails() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = Command::new(env!("CARGO_BIN_EXE_agemix"))
        .arg("--mixing")
        .arg(tmp.path().join("nope.csv"))
        .output()
        .expect("run agemix");
    assert!(!out.status.success());
}
