use std::fs;
use std::path::{Path, PathBuf};

use fmap_core::analyzer::AnalyzerOptions;
use fmap_core::generate_feature_map;

fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(&path, content).expect("write");
    PathBuf::from(rel)
}

fn scaffold(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    files.push(write(
        root,
        "apps/web/app/dashboard/page.tsx",
        r#"
        /**
         * @screen Dashboard
         * @feature Project Management
         */
        import { UserCard } from "@/components/UserCard";
        import { UnusedCard } from "@/components/UnusedCard";
        import { getProjects } from "@/lib/actions/projects";

        export default async function DashboardPage() {
            const projects = await getProjects();
            return <UserCard projects={projects} />;
        }
        "#,
    ));

    files.push(write(
        root,
        "apps/web/components/UserCard.tsx",
        r#"
        /**
         * @component UserCard
         * @feature Project Management
         */
        export function UserCard(props: { projects: unknown }) {
            return <div />;
        }
        "#,
    ));

    files.push(write(
        root,
        "apps/web/components/UnusedCard.tsx",
        r#"
        /** @component UnusedCard */
        export function UnusedCard() {
            return <div />;
        }
        "#,
    ));

    files.push(write(
        root,
        "apps/web/lib/actions/projects.ts",
        r#"
        /**
         * @serverAction getProjects
         * @feature Project Management
         * @dbTables Projects
         */
        export async function getProjects() {
            return [];
        }
        "#,
    ));

    files.push(write(
        root,
        "apps/web/lib/db/schema.ts",
        r#"
        /** @dbTable projects */
        export const projects = table("projects");
        "#,
    ));

    files.push(write(
        root,
        "apps/web/lib/billing.ts",
        r#"
        /** @module billing */
        import { db } from "@/lib/db/client";

        export function invoice() {
            return db.query("select 1");
        }
        "#,
    ));

    files.push(write(
        root,
        "apps/web/lib/db/client.ts",
        r#"
        /**
         * @module db/client
         * @description Shared database client.
         */
        export const db = { query: (_sql: string) => [] };
        "#,
    ));

    write(
        root,
        "tsconfig.json",
        r#"{
            // path aliases for the web app
            "compilerOptions": {
                "paths": { "@/*": ["./apps/web/*"] }
            }
        }"#,
    );

    files
}

fn options(root: &Path) -> AnalyzerOptions {
    AnalyzerOptions {
        tsconfig: Some(root.join("tsconfig.json")),
        ..AnalyzerOptions::default()
    }
}

#[test]
fn end_to_end_dashboard_scenario() {
    let dir = tempfile::tempdir().expect("tempdir");
    let files = scaffold(dir.path());

    let map = generate_feature_map(dir.path(), &files, options(dir.path())).expect("pipeline");

    let group = &map.features["Project Management"];
    let dashboard = &group.screens[0];
    assert_eq!(dashboard.name, "Dashboard");
    assert_eq!(dashboard.used_components, vec!["UserCard"]);
    assert_eq!(dashboard.used_actions, vec!["getProjects"]);

    let user_card = &group.components[0];
    assert_eq!(user_card.used_in_screens, vec!["Dashboard"]);

    let get_projects = &group.actions[0];
    assert_eq!(get_projects.used_in_screens, vec!["Dashboard"]);
    assert_eq!(get_projects.db_tables, vec!["Projects"]);
}

#[test]
fn non_rendered_import_is_excluded() {
    let dir = tempfile::tempdir().expect("tempdir");
    let files = scaffold(dir.path());

    let map = generate_feature_map(dir.path(), &files, options(dir.path())).expect("pipeline");

    let dashboard = &map.features["Project Management"].screens[0];
    assert!(!dashboard.used_components.contains(&"UnusedCard".to_string()));

    let unused = map
        .uncategorized
        .components
        .iter()
        .find(|component| component.name == "UnusedCard")
        .expect("UnusedCard item exists");
    assert!(unused.used_in_screens.is_empty());
}

#[test]
fn table_reverse_reference_is_case_insensitive() {
    let dir = tempfile::tempdir().expect("tempdir");
    let files = scaffold(dir.path());

    let map = generate_feature_map(dir.path(), &files, options(dir.path())).expect("pipeline");

    // Action declares "Projects", table is named "projects".
    let table = &map.uncategorized.tables[0];
    assert_eq!(table.name, "projects");
    assert_eq!(table.used_in_actions, vec!["getProjects"]);
}

#[test]
fn modules_link_bidirectionally() {
    let dir = tempfile::tempdir().expect("tempdir");
    let files = scaffold(dir.path());

    let map = generate_feature_map(dir.path(), &files, options(dir.path())).expect("pipeline");

    let modules = &map.uncategorized.modules;
    let billing = modules.iter().find(|m| m.name == "billing").expect("billing");
    let db_client = modules.iter().find(|m| m.name == "db/client").expect("db/client");
    assert_eq!(billing.used_modules, vec!["db/client"]);
    assert_eq!(db_client.used_in_modules, vec!["billing"]);
    assert_eq!(map.module_descriptions["db/client"], "Shared database client.");
}

#[test]
fn output_is_deterministic_apart_from_timestamp() {
    let dir = tempfile::tempdir().expect("tempdir");
    let files = scaffold(dir.path());

    let mut first = generate_feature_map(dir.path(), &files, options(dir.path())).expect("first");
    let mut reversed: Vec<_> = files.iter().rev().cloned().collect();
    reversed.push(files[0].clone()); // duplicates must not change the result
    let mut second =
        generate_feature_map(dir.path(), &reversed, options(dir.path())).expect("second");

    first.generated_at = String::new();
    second.generated_at = String::new();
    let first_json = serde_json::to_string_pretty(&first).expect("json");
    let second_json = serde_json::to_string_pretty(&second).expect("json");
    assert_eq!(first_json, second_json);
}

#[test]
fn missing_file_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut files = scaffold(dir.path());
    files.push(PathBuf::from("apps/web/does-not-exist.ts"));

    let map = generate_feature_map(dir.path(), &files, options(dir.path())).expect("pipeline");
    assert!(!map.features.is_empty());
}

#[test]
fn malformed_tsconfig_is_terminal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let files = scaffold(dir.path());
    fs::write(dir.path().join("tsconfig.json"), "{ not json at all").expect("write");

    let result = generate_feature_map(dir.path(), &files, options(dir.path()));
    assert!(result.is_err());
}

#[test]
fn apps_list_is_sorted_and_known_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut files = scaffold(dir.path());
    files.push(write(
        dir.path(),
        "apps/admin/app/audit/page.tsx",
        r#"
        /** @screen AuditLog */
        export default function AuditPage() { return <div />; }
        "#,
    ));
    files.push(write(
        dir.path(),
        "packages/shared/lib/ids.ts",
        r#"
        /** @module ids */
        export const newId = () => "id";
        "#,
    ));

    let map = generate_feature_map(dir.path(), &files, options(dir.path())).expect("pipeline");
    assert_eq!(map.apps, vec!["admin", "web"]);
}
