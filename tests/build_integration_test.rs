use assert_cmd::cargo::cargo_bin_cmd;
use eyre::Result;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temp HOME with XDG dirs pointed inside it
struct Sandbox {
    temp: TempDir,
}

impl Sandbox {
    fn new() -> Result<Self> {
        Ok(Self { temp: TempDir::new()? })
    }

    fn config_home(&self) -> PathBuf {
        self.temp.path().join("config")
    }

    fn data_home(&self) -> PathBuf {
        self.temp.path().join("data")
    }

    fn output_dir(&self) -> PathBuf {
        self.data_home().join("zsh").join("custom-completion-zsh")
    }

    fn write_config(&self, content: &str) -> Result<()> {
        let dir = self.config_home().join("custom-completion-zsh");
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("config.toml"), content)?;
        Ok(())
    }

    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("custom-completion-zsh");
        cmd.env("HOME", self.temp.path())
            .env("XDG_CONFIG_HOME", self.config_home())
            .env("XDG_DATA_HOME", self.data_home())
            .env("CUSTOM_COMPLETION_ZSH_SHELL", "/bin/sh");
        cmd
    }
}

fn list_dir(dir: &Path) -> Result<Vec<String>> {
    let mut names = fs::read_dir(dir)?
        .map(|e| e.map(|e| e.file_name().to_string_lossy().to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    names.sort();
    Ok(names)
}

#[test]
fn test_build_writes_captured_stdout() -> Result<()> {
    let sandbox = Sandbox::new()?;
    sandbox.write_config("[[tool]]\nname = \"git\"\nexec = \"echo done\"\n")?;

    sandbox
        .cmd()
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed: echo done"))
        .stdout(predicate::str::contains("to your fpath"));

    let compfile = sandbox.output_dir().join("_git");
    assert_eq!(fs::read(&compfile)?, b"done\n");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        assert_eq!(fs::metadata(&compfile)?.permissions().mode() & 0o777, 0o644);
    }
    Ok(())
}

#[test]
fn test_build_creates_one_file_per_entry() -> Result<()> {
    let sandbox = Sandbox::new()?;
    sandbox.write_config(
        r#"
[[tool]]
name = "alpha"
exec = "echo a"

[[tool]]
name = "beta"
exec = "printf b"

[[tool]]
name = "gamma"
exec = "echo g"
"#,
    )?;

    sandbox.cmd().arg("build").arg("--quiet").assert().success().stdout("");

    assert_eq!(list_dir(&sandbox.output_dir())?, vec!["_alpha", "_beta", "_gamma"]);
    assert_eq!(fs::read(sandbox.output_dir().join("_beta"))?, b"b");
    Ok(())
}

#[test]
fn test_rebuild_drops_removed_entries() -> Result<()> {
    let sandbox = Sandbox::new()?;
    sandbox.write_config("[[tool]]\nname = \"a\"\nexec = \"echo a\"\n\n[[tool]]\nname = \"b\"\nexec = \"echo b\"\n")?;
    sandbox.cmd().arg("build").assert().success();
    assert_eq!(list_dir(&sandbox.output_dir())?, vec!["_a", "_b"]);

    sandbox.write_config("[[tool]]\nname = \"a\"\nexec = \"echo a\"\n")?;
    sandbox.cmd().arg("build").assert().success();
    assert_eq!(list_dir(&sandbox.output_dir())?, vec!["_a"]);
    Ok(())
}

#[test]
fn test_failing_command_is_ignored_by_default() -> Result<()> {
    let sandbox = Sandbox::new()?;
    sandbox.write_config("[[tool]]\nname = \"broken\"\nexec = \"echo partial; exit 4\"\n")?;

    sandbox
        .cmd()
        .arg("build")
        .arg("--quiet")
        .assert()
        .success()
        .stdout("")
        .stderr("");

    assert_eq!(fs::read(sandbox.output_dir().join("_broken"))?, b"partial\n");
    Ok(())
}

#[test]
fn test_write_failure_leaves_output_dir_empty() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let blocked = sandbox.output_dir().join("_b");
    sandbox.write_config(&format!(
        "[[tool]]\nname = \"a\"\nexec = \"echo a\"\n\n\
         [[tool]]\nname = \"b\"\nexec = \"mkdir '{}'; echo b\"\n\n\
         [[tool]]\nname = \"c\"\nexec = \"echo c\"\n",
        blocked.display()
    ))?;

    sandbox
        .cmd()
        .arg("build")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to write"));

    assert!(sandbox.output_dir().is_dir());
    assert!(list_dir(&sandbox.output_dir())?.is_empty());
    Ok(())
}

#[test]
fn test_strict_fails_on_command_failure() -> Result<()> {
    let sandbox = Sandbox::new()?;
    sandbox.write_config("[[tool]]\nname = \"broken\"\nexec = \"exit 4\"\n")?;

    sandbox
        .cmd()
        .arg("build")
        .arg("--strict")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("command for broken exited with code 4"))
        .stderr(predicate::str::contains("1 of 1 tool commands failed"));

    assert!(sandbox.output_dir().join("_broken").exists());
    Ok(())
}

#[test]
fn test_keep_preserves_existing_files() -> Result<()> {
    let sandbox = Sandbox::new()?;
    fs::create_dir_all(sandbox.output_dir())?;
    fs::write(sandbox.output_dir().join("_git"), "cached\n")?;
    sandbox.write_config("[[tool]]\nname = \"git\"\nexec = \"echo fresh\"\n\n[[tool]]\nname = \"gh\"\nexec = \"echo gh\"\n")?;

    sandbox
        .cmd()
        .arg("build")
        .arg("--keep")
        .assert()
        .success()
        .stdout(predicate::str::contains("Kept: echo fresh"))
        .stdout(predicate::str::contains("Completed: echo gh"));

    assert_eq!(fs::read(sandbox.output_dir().join("_git"))?, b"cached\n");
    assert_eq!(fs::read(sandbox.output_dir().join("_gh"))?, b"gh\n");
    Ok(())
}

#[test]
fn test_build_without_config_fails_and_keeps_output() -> Result<()> {
    let sandbox = Sandbox::new()?;
    fs::create_dir_all(sandbox.output_dir())?;
    fs::write(sandbox.output_dir().join("_git"), "cached\n")?;

    sandbox
        .cmd()
        .arg("build")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to decode TOML"));

    assert!(sandbox.output_dir().join("_git").exists());
    Ok(())
}

#[test]
fn test_shell_flag_overrides_env() -> Result<()> {
    let sandbox = Sandbox::new()?;
    sandbox.write_config("[[tool]]\nname = \"git\"\nexec = \"echo done\"\n")?;

    sandbox
        .cmd()
        .env("CUSTOM_COMPLETION_ZSH_SHELL", "/definitely/not/a/shell")
        .arg("build")
        .arg("--shell")
        .arg("/bin/sh")
        .assert()
        .success();

    assert_eq!(fs::read(sandbox.output_dir().join("_git"))?, b"done\n");
    Ok(())
}
