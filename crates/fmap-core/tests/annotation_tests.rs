use fmap_core::model::EntityKind;
use fmap_core::extract_annotations;

#[test]
fn extracts_screen_with_feature_and_declared_relationships() {
    let source = r#"
        /**
         * @screen Dashboard
         * @feature Project Management
         * @usedComponents UserCard, ProjectList
         * @usedActions getProjects
         */
        export default function DashboardPage() {
            return null;
        }
    "#;

    let extracted = extract_annotations(source, "apps/web/app/dashboard/page.tsx");
    assert_eq!(extracted.items.len(), 1);
    let item = &extracted.items[0];
    assert_eq!(item.kind, EntityKind::Screen);
    assert_eq!(item.name, "Dashboard");
    assert_eq!(item.feature.as_deref(), Some("Project Management"));
    assert_eq!(item.app, "web");
    assert_eq!(item.used_components, vec!["UserCard", "ProjectList"]);
    assert_eq!(item.used_actions, vec!["getProjects"]);
}

#[test]
fn supports_multiple_annotated_declarations_per_file() {
    let source = r#"
        /** @serverAction getUser */
        export async function getUser(id: string) {}

        /** @serverAction updateUser
         * @dbTables Users
         */
        export async function updateUser(id: string) {}
    "#;

    let extracted = extract_annotations(source, "apps/web/lib/actions/users.ts");
    assert_eq!(extracted.items.len(), 2);
    assert_eq!(extracted.items[0].name, "getUser");
    assert_eq!(extracted.items[1].name, "updateUser");
    assert_eq!(extracted.items[1].db_tables, vec!["Users"]);
}

#[test]
fn collects_module_metadata_under_path_derived_name() {
    let source = r#"
        /**
         * @module db/client
         * @description Shared database client
         * with connection pooling.
         * @types DbClient, PoolOptions
         * @utilities createClient, withTransaction
         */
        export const db = connect();
    "#;

    let extracted = extract_annotations(source, "apps/web/lib/db/client.ts");
    assert_eq!(extracted.items.len(), 1);
    assert_eq!(extracted.items[0].kind, EntityKind::Module);
    assert_eq!(
        extracted.metadata.descriptions["db/client"],
        "Shared database client with connection pooling."
    );
    assert_eq!(extracted.metadata.types["db/client"], vec!["DbClient", "PoolOptions"]);
    assert_eq!(
        extracted.metadata.utilities["db/client"],
        vec!["createClient", "withTransaction"]
    );
}

#[test]
fn metadata_requires_a_module_declaration() {
    let source = r#"
        /**
         * @component Button
         * @description Not module metadata.
         */
        export function Button() {}
    "#;

    let extracted = extract_annotations(source, "apps/web/components/Button.tsx");
    assert!(extracted.metadata.descriptions.is_empty());
}

#[test]
fn malformed_tags_are_treated_as_absent() {
    let source = r#"
        /**
         * @screen
         * @component Nav
         * @feature
         * @usedComponents ,, ,
         */
        export function Nav() {}
    "#;

    let extracted = extract_annotations(source, "apps/web/components/Nav.tsx");
    // The bare @screen tag has no name and produces no item.
    assert_eq!(extracted.items.len(), 1);
    let item = &extracted.items[0];
    assert_eq!(item.name, "Nav");
    assert_eq!(item.feature, None);
    assert!(item.used_components.is_empty());
}

#[test]
fn app_tag_overrides_path_inference() {
    let source = r#"
        /**
         * @dbTable sessions
         * @app auth-service
         */
    "#;

    let extracted = extract_annotations(source, "packages/schema/sessions.ts");
    assert_eq!(extracted.items[0].app, "auth-service");
}

#[test]
fn never_fails_on_arbitrary_text() {
    for junk in [
        "",
        "not a comment at all",
        "/** */",
        "/*** nested ** stars ***/",
        "/** @ */",
        "const s = \"/** @screen Fake */\";",
    ] {
        let _ = extract_annotations(junk, "apps/web/x.ts");
    }
}
