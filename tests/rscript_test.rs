#![cfg(unix)]

use std::{
    fs,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};

use cdt_gies::{Dataset, Gies, GiesConfig, GiesError, Rscript, Score};

/// Stand-in for `Rscript`: answers the package check, inspects the rendered
/// script, then writes a result or fails depending on marker files in `bin_dir`.
fn fake_rscript(bin_dir: &Path) -> PathBuf {
    let dir = bin_dir.display();
    let body = format!(
        r#"#!/bin/sh
[ "$1" = "--vanilla" ] || {{ echo "missing --vanilla" >&2; exit 2; }}
if [ "$2" = "-e" ]; then
  [ -e "{dir}/nopkg" ] && exit 1
  exit 0
fi
[ "$#" -eq 2 ] || {{ echo "unexpected argv: $*" >&2; exit 2; }}
script="$2"
echo "$script" > "{dir}/last_script"
grep -q 'new("GaussL0penObsScore"' "$script" || {{ echo "wrong score" >&2; exit 3; }}
grep -q 'if (FALSE)' "$script" || {{ echo "skeleton flag not rendered" >&2; exit 3; }}
if [ -e "{dir}/fail" ]; then
  echo "Error in gies(): singular covariance" >&2
  exit 1
fi
out=$(sed -n "s/.*file = '\(.*result\.csv\)'.*/\1/p" "$script")
[ -n "$out" ] || {{ echo "no output path" >&2; exit 3; }}
printf '"V1","V2","V3"\n0,1,0\n0,0,0\n0,1,0\n' > "$out"
"#
    );
    let path = bin_dir.join("Rscript");
    fs::write(&path, body).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn abc() -> Dataset {
    Dataset::new(
        vec!["A".into(), "B".into(), "C".into()],
        vec![vec![1.0, 2.0, 3.0], vec![2.0, 0.5, 1.0]],
    )
    .unwrap()
}

fn workspaces(root: &Path) -> usize {
    fs::read_dir(root)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("cdt_gies"))
        .count()
}

async fn gies(bin: &Path, root: &Path) -> Gies {
    Gies::new(Rscript::new(bin), root, GiesConfig::default())
        .await
        .unwrap()
}

#[tokio::test]
async fn rendered_script_runs_and_result_is_read_back() {
    let bin_dir = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    let gies = gies(&fake_rscript(bin_dir.path()), root.path()).await;

    let graph = gies.create_graph_from_data(&abc()).await.unwrap();

    let edges: Vec<_> = graph
        .edge_indices()
        .map(|e| {
            let (s, t) = graph.edge_endpoints(e).unwrap();
            (graph[s].clone(), graph[t].clone())
        })
        .collect();
    assert_eq!(
        edges,
        vec![("A".to_string(), "B".to_string()), ("C".to_string(), "B".to_string())]
    );

    let script = fs::read_to_string(bin_dir.path().join("last_script")).unwrap();
    assert!(script.trim().ends_with(".R"));
    assert!(!Path::new(script.trim()).exists());
    assert_eq!(workspaces(gies.temp_root()), 0);
}

#[tokio::test]
async fn non_zero_exit_maps_to_script_failed() {
    let bin_dir = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    let gies = gies(&fake_rscript(bin_dir.path()), root.path()).await;
    fs::write(bin_dir.path().join("fail"), "").unwrap();

    let err = gies.create_graph_from_data(&abc()).await.unwrap_err();
    match err {
        GiesError::ScriptFailed { code, stderr } => {
            assert_eq!(code, Some(1));
            assert_eq!(stderr, "Error in gies(): singular covariance");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    let script = fs::read_to_string(bin_dir.path().join("last_script")).unwrap();
    assert!(!Path::new(script.trim()).exists());
    assert_eq!(workspaces(root.path()), 0);
}

#[tokio::test]
async fn verbose_call_streams_instead_of_capturing() {
    let bin_dir = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    let gies = gies(&fake_rscript(bin_dir.path()), root.path()).await;
    fs::write(bin_dir.path().join("fail"), "").unwrap();
    let verbose = GiesConfig {
        score: Score::Observational,
        verbose: true,
    };

    let err = gies.orient_with(&abc(), None, &verbose).await.unwrap_err();
    // Output went to the terminal, so nothing was captured.
    assert!(matches!(
        err,
        GiesError::ScriptFailed { code: Some(1), ref stderr } if stderr.is_empty()
    ));
    assert_eq!(workspaces(root.path()), 0);
}

#[tokio::test]
async fn package_check_follows_exit_status() {
    let bin_dir = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    let bin = fake_rscript(bin_dir.path());
    fs::write(bin_dir.path().join("nopkg"), "").unwrap();

    let err = Gies::new(Rscript::new(&bin), root.path(), GiesConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, GiesError::PackageUnavailable { ref package } if package == "pcalg"));
}
