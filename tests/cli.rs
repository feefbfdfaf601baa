use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::error::Error;
use std::process::Command;

fn ptrchase() -> Result<Command, Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("ptrchase")?;
    cmd.env_remove("PTRCHASE_MODE").env_remove("RUST_LOG");
    Ok(cmd)
}

#[test]
fn array_reports_closed_form_sum() -> Result<(), Box<dyn Error>> {
    ptrchase()?
        .args(["array", "100000"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^workload=array_add n=100000 sum=51031728 time_ns=\d+\n$",
        )?);
    Ok(())
}

#[test]
fn stack_layout_above_capacity_exits_2() -> Result<(), Box<dyn Error>> {
    ptrchase()?
        .args(["list-stack", "1000001"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("N too large"));
    Ok(())
}

#[test]
fn non_positive_n_falls_back_to_default() -> Result<(), Box<dyn Error>> {
    for n in ["0", "-7"] {
        ptrchase()?
            .args(["list", n])
            .assert()
            .success()
            .stdout(predicate::str::starts_with(
                "workload=list_add n=100000 sum=51031728 ",
            ));
    }
    Ok(())
}

#[test]
fn missing_n_uses_default() -> Result<(), Box<dyn Error>> {
    ptrchase()?
        .arg("list-stack")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "workload=list_add_stack n=100000 sum=51031728 time_ns=",
        ));
    Ok(())
}

#[test]
fn block_layout_appends_contiguity() -> Result<(), Box<dyn Error>> {
    ptrchase()?
        .args(["list-block", "4096"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^workload=list_add_block n=4096 sum=\d+ time_ns=\d+ node_size=\d+ contiguous_links=4095/4095 contiguous_pct=100\.00\n$",
        )?);
    Ok(())
}

#[test]
fn traced_mode_prints_no_report() -> Result<(), Box<dyn Error>> {
    ptrchase()?
        .args(["array", "1", "--mode", "traced"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    ptrchase()?
        .env("PTRCHASE_MODE", "traced")
        .args(["list-stack", "3"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    ptrchase()?
        .args(["list-block", "100", "--mode", "traced", "--contiguity"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn contiguity_only_on_request_for_other_layouts() -> Result<(), Box<dyn Error>> {
    ptrchase()?
        .args(["list", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("contiguous_links").not());

    ptrchase()?
        .args(["list-stack", "100", "--contiguity"])
        .assert()
        .success()
        .stdout(predicate::str::contains("contiguous_links=99/99"));
    Ok(())
}

#[test]
fn single_element_block_has_no_links() -> Result<(), Box<dyn Error>> {
    ptrchase()?
        .args(["list-block", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sum=0").and(predicate::str::contains(
            "contiguous_links=0/0",
        )));
    Ok(())
}

#[test]
fn repeated_runs_are_deterministic() -> Result<(), Box<dyn Error>> {
    // Everything but time_ns must match between runs
    let run = || -> Result<String, Box<dyn Error>> {
        let out = ptrchase()?.args(["list-block", "50000"]).output()?;
        let line = String::from_utf8(out.stdout)?;
        Ok(line
            .split_whitespace()
            .filter(|token| !token.starts_with("time_ns="))
            .collect::<Vec<_>>()
            .join(" "))
    };
    assert_eq!(run()?, run()?);
    Ok(())
}

#[test]
fn array_above_maximum_exits_2() -> Result<(), Box<dyn Error>> {
    ptrchase()?
        .args(["array", "200000001"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());
    Ok(())
}
