// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashvault::format::parse_settings;
use dashvault::model::{ArtifactKind, ArtifactOutcome};
use dashvault::services::RenderCache;
use dashvault::store::FsContentAccess;
use dashvault::structure::{DashboardStructure, OperationParams, StructureContext};
use rstest::{fixture, rstest};
use tempfile::TempDir;

fn read_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("end_to_end")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("failed to read {path:?}: {err}"))
}

struct Repo {
    tmp: TempDir,
    cache: Arc<RenderCache>,
    dashboards: DashboardStructure,
}

impl Repo {
    fn content(&self, path: &str) -> PathBuf {
        self.tmp.path().join("content").join(path.trim_start_matches('/'))
    }

    fn system(&self, path: &str) -> PathBuf {
        self.tmp.path().join("system").join(path.trim_start_matches('/'))
    }

    fn read(&self, path: &str) -> String {
        fs::read_to_string(self.content(path))
            .unwrap_or_else(|err| panic!("failed to read {path}: {err}"))
    }
}

#[fixture]
fn repo() -> Repo {
    let tmp = tempfile::tempdir().expect("tempdir");
    let user = Arc::new(FsContentAccess::new(tmp.path().join("content")));
    let system = Arc::new(FsContentAccess::new(tmp.path().join("system")));
    let cache = Arc::new(RenderCache::new());
    let ctx = StructureContext::new(user, system).with_cache(cache.clone());

    Repo {
        tmp,
        cache,
        dashboards: DashboardStructure::new(ctx),
    }
}

#[rstest]
fn new_delete_and_save_again(repo: Repo) {
    repo.dashboards
        .new_file(&OperationParams::new("/public/x.wcdf"))
        .expect("new");

    let settings =
        parse_settings("/public/x.wcdf", &repo.read("/public/x.wcdf")).expect("settings");
    assert_eq!(settings.title, "Dashboard");
    let structure: serde_json::Value =
        serde_json::from_str(&repo.read("/public/x.cdfde")).expect("structure json");
    assert_eq!(structure["components"]["rows"], serde_json::json!([]));
    assert!(!repo.content("/public/x.cda").exists());
    assert!(!repo.content("/public/x.cgg.js").exists());

    repo.dashboards
        .delete(&OperationParams::new("/public/x.cdfde"))
        .expect("delete");
    assert!(!repo.content("/public/x.cdfde").exists());
    assert!(repo.content("/public/x.wcdf").exists());

    let summary = repo
        .dashboards
        .save(&OperationParams::new("/public/x.cdfde").with_structure("{}"))
        .expect("save after delete");
    assert_eq!(summary.outcome(ArtifactKind::Structure), Some(ArtifactOutcome::Created));
    assert_eq!(repo.read("/public/x.cdfde"), "{}");
}

#[rstest]
fn saving_a_dashboard_with_a_chart_writes_every_derived_file(repo: Repo) {
    let structure = read_fixture("sales.cdfde");
    repo.cache.put("/public/sales.wcdf", "<html>stale</html>");

    let summary = repo
        .dashboards
        .save_as(
            &OperationParams::new("/public/sales.wcdf")
                .with_structure(structure.clone())
                .with_title("Sales"),
        )
        .expect("save as");

    assert_eq!(repo.read("/public/sales.cdfde"), structure);
    let cda = repo.read("/public/sales.cda");
    assert!(cda.contains(r#"<DataAccess id="salesQuery""#), "{cda}");
    let script = repo.read("/public/sales.cgg.js");
    assert!(script.contains("cgg.register(\"salesBar\""), "{script}");

    assert!(summary.cache_invalidated);
    assert_eq!(repo.cache.get("/public/sales.wcdf"), None);
    for kind in [
        ArtifactKind::Settings,
        ArtifactKind::Structure,
        ArtifactKind::DataAccess,
        ArtifactKind::Script,
    ] {
        assert_eq!(summary.outcome(kind), Some(ArtifactOutcome::Created), "{kind}");
    }
}

#[rstest]
fn removing_every_source_removes_the_derived_files(repo: Repo) {
    let params = OperationParams::new("/public/sales.cdfde");
    repo.dashboards
        .save(&params.clone().with_structure(read_fixture("sales.cdfde")))
        .expect("first save");
    assert!(repo.content("/public/sales.cda").exists());

    let summary = repo
        .dashboards
        .save(&params.with_structure("{}"))
        .expect("second save");

    assert!(!repo.content("/public/sales.cda").exists());
    assert!(!repo.content("/public/sales.cgg.js").exists());
    assert_eq!(summary.outcome(ArtifactKind::DataAccess), Some(ArtifactOutcome::Deleted));
    assert_eq!(summary.outcome(ArtifactKind::Script), Some(ArtifactOutcome::Deleted));
}

#[rstest]
fn preview_copies_live_until_the_real_save(repo: Repo) {
    let structure = read_fixture("sales.cdfde");
    repo.cache.put("/public/sales.wcdf", "<html/>");

    let summary = repo
        .dashboards
        .save(&OperationParams::new("/public/sales_tmp.cdfde").with_structure(structure.clone()))
        .expect("preview save");
    assert!(!summary.cache_invalidated);
    assert!(repo.content("/public/sales_tmp.cdfde").exists());
    assert!(repo.content("/public/sales_tmp.cda").exists());
    assert!(!repo.content("/public/sales_tmp.cgg.js").exists());
    assert!(repo.cache.get("/public/sales.wcdf").is_some());

    repo.dashboards
        .save(&OperationParams::new("/public/sales.cdfde").with_structure(structure))
        .expect("save");
    assert!(!repo.content("/public/sales_tmp.cdfde").exists());
    assert!(!repo.content("/public/sales_tmp.cda").exists());
    assert!(repo.cache.is_empty());
}

#[rstest]
fn saving_twice_leaves_identical_bytes(repo: Repo) {
    let params =
        OperationParams::new("/public/sales.cdfde").with_structure(read_fixture("sales.cdfde"));
    repo.dashboards.save(&params).expect("first save");
    let cda = repo.read("/public/sales.cda");
    let script = repo.read("/public/sales.cgg.js");

    let summary = repo.dashboards.save(&params).expect("second save");

    assert_eq!(repo.read("/public/sales.cda"), cda);
    assert_eq!(repo.read("/public/sales.cgg.js"), script);
    assert!(summary
        .artifacts
        .values()
        .all(|outcome| *outcome == ArtifactOutcome::Unchanged));
}

#[rstest]
fn widget_settings_publish_into_system_content(repo: Repo) {
    repo.dashboards
        .new_file(&OperationParams::new("/public/widgets/kpi.wcdf").with_title("KPI"))
        .expect("new");

    let summary = repo
        .dashboards
        .save_settings(
            &OperationParams::new("/public/widgets/kpi.wcdf")
                .with_override("widget", true)
                .with_override("widgetParameters", serde_json::json!(["region", "year"])),
        )
        .expect("save settings");

    let registration = fs::read_to_string(repo.system("/public/widgets/kpi.component.xml"))
        .expect("registration written");
    assert!(registration.contains("<Name>widgetkpi</Name>"));
    assert!(registration.contains(r#"<Property type="own">year</Property>"#));
    assert_eq!(
        summary.outcome(ArtifactKind::WidgetRegistration),
        Some(ArtifactOutcome::Created)
    );

    let settings = parse_settings(
        "/public/widgets/kpi.wcdf",
        &repo.read("/public/widgets/kpi.wcdf"),
    )
    .expect("settings");
    assert!(settings.widget);
    assert_eq!(settings.title, "KPI");
    assert_eq!(settings.widget_parameters, vec!["region", "year"]);
}

#[rstest]
fn settings_of_a_missing_dashboard_are_not_found(repo: Repo) {
    let err = repo
        .dashboards
        .save_settings(&OperationParams::new("/public/ghost.wcdf").with_title("Ghost"))
        .unwrap_err();
    assert!(err.is_not_found(), "{err}");
    assert!(!repo.content("/public/ghost.wcdf").exists());
}

#[rstest]
fn system_templates_override_the_builtin_ones(repo: Repo) {
    fs::create_dir_all(repo.system("resources")).expect("mkdir");
    fs::write(
        repo.system("resources/empty.wcdf"),
        "<cdf><title>@DASBOARD_TITLE@</title><style>Dark</style></cdf>",
    )
    .expect("write template");

    repo.dashboards
        .new_file(&OperationParams::new("/public/x.wcdf").with_title("Themed"))
        .expect("new");

    let settings =
        parse_settings("/public/x.wcdf", &repo.read("/public/x.wcdf")).expect("settings");
    assert_eq!(settings.title, "Themed");
    assert_eq!(settings.style, "Dark");
}
