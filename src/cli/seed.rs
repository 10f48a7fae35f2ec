// Seed command: idempotent creation of the permission tree and the super admin

use crate::app_data::AppData;
use crate::config::{begin_transaction, commit_transaction};
use crate::errors::InternalError;
use crate::stores::admin_user_store::{self, NewAdminUser};
use crate::stores::{operation_store, role_store};
use crate::types::db::role::SUPER_ADMIN_SLUG;
use crate::types::internal::operation::permission;

/// Display name of the seeded super admin account
pub const SUPER_ADMIN_NAME: &str = "Super Admin";

/// Headings with their leaf operations as `(slug, display name)`, in menu order
///
/// A heading's slug doubles as its display name.
pub const OPERATION_TREE: &[(&str, &[(&str, &str)])] = &[
    (
        "Roles",
        &[
            (permission::LIST_ROLES, "List"),
            (permission::ADD_ROLE, "Add"),
            (permission::EDIT_ROLE, "Edit"),
            (permission::DELETE_ROLE, "Delete"),
        ],
    ),
    (
        "Admin Users",
        &[
            (permission::LIST_ADMIN_USERS, "List"),
            (permission::ADD_ADMIN_USER, "Add"),
            (permission::EDIT_ADMIN_USER, "Edit"),
            (permission::DELETE_ADMIN_USER, "Delete"),
            (permission::RESET_PASSWORD, "Reset Password"),
        ],
    ),
];

/// What a seed run created; everything already present is left untouched
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub operations_created: usize,
    pub role_created: bool,
    pub super_admin_created: bool,
}

/// Seed the database inside one transaction
///
/// The super admin account is only created when both `email` and `password`
/// are given and no live account uses that email.
pub async fn seed(
    app_data: &AppData,
    email: Option<String>,
    password: Option<String>,
) -> Result<SeedReport, InternalError> {
    let txn = begin_transaction(&app_data.db).await?;
    let mut report = SeedReport::default();

    for (heading_order, (heading_slug, leaves)) in OPERATION_TREE.iter().enumerate() {
        let heading = match operation_store::find_by_slug(&txn, heading_slug).await? {
            Some(heading) => heading,
            None => {
                report.operations_created += 1;
                operation_store::insert(&txn, heading_slug, heading_slug, heading_order as i32, None)
                    .await?
            }
        };

        for (leaf_order, (leaf_slug, leaf_name)) in leaves.iter().enumerate() {
            if operation_store::find_by_slug(&txn, leaf_slug).await?.is_none() {
                operation_store::insert(
                    &txn,
                    leaf_slug,
                    leaf_name,
                    leaf_order as i32,
                    Some(heading.id.clone()),
                )
                .await?;
                report.operations_created += 1;
            }
        }
    }

    let role = match role_store::find_by_slug(&txn, SUPER_ADMIN_SLUG).await? {
        Some(role) => role,
        None => {
            report.role_created = true;
            role_store::insert(&txn, SUPER_ADMIN_SLUG, SUPER_ADMIN_SLUG, false).await?
        }
    };

    match (email, password) {
        (Some(email), Some(password)) => {
            if admin_user_store::find_active_by_email(&txn, &email)
                .await?
                .is_none()
            {
                let password_hash = app_data.providers.crypto_provider.hash_password(&password)?;
                let user = admin_user_store::insert(
                    &txn,
                    NewAdminUser {
                        name: SUPER_ADMIN_NAME.to_string(),
                        email,
                        password_hash,
                    },
                )
                .await?;
                admin_user_store::assign_role(&txn, &user.id, &role.id).await?;
                report.super_admin_created = true;
            }
        }
        _ => tracing::warn!("Super admin email or password not given; account not seeded"),
    }

    commit_transaction(txn).await?;

    tracing::info!(
        operations_created = report.operations_created,
        role_created = report.role_created,
        super_admin_created = report.super_admin_created,
        "Seed completed"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{setup_test_app, SUPER_ADMIN_EMAIL, TEST_PASSWORD};
    use crate::types::db::operation;
    use sea_orm::{EntityTrait, PaginatorTrait};

    fn credentials() -> (Option<String>, Option<String>) {
        (
            Some(SUPER_ADMIN_EMAIL.to_string()),
            Some(TEST_PASSWORD.to_string()),
        )
    }

    #[tokio::test]
    async fn test_seed_creates_tree_role_and_super_admin() {
        let (app_data, _) = setup_test_app().await;
        let (email, password) = credentials();

        let report = seed(&app_data, email, password).await.unwrap();

        assert_eq!(report.operations_created, 11);
        assert!(report.role_created);
        assert!(report.super_admin_created);

        let role = role_store::find_by_slug(&app_data.db, SUPER_ADMIN_SLUG)
            .await
            .unwrap()
            .unwrap();
        assert!(!role.editable);

        let user = admin_user_store::find_active_by_email(&app_data.db, SUPER_ADMIN_EMAIL)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.name, SUPER_ADMIN_NAME);
        assert!(
            app_data
                .providers
                .authorization_provider
                .is_super_admin(&app_data.db, &user.id)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_seed_gives_leaves_display_names() {
        let (app_data, _) = setup_test_app().await;
        seed(&app_data, None, None).await.unwrap();

        let add_role = operation_store::find_by_slug(&app_data.db, permission::ADD_ROLE)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(add_role.name, "Add");

        let reset = operation_store::find_by_slug(&app_data.db, permission::RESET_PASSWORD)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reset.name, "Reset Password");

        let heading = operation_store::find_by_slug(&app_data.db, "Admin Users")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(heading.name, "Admin Users");
        assert_eq!(reset.parent_id, Some(heading.id));
    }

    #[tokio::test]
    async fn test_seed_twice_changes_nothing() {
        let (app_data, _) = setup_test_app().await;
        let (email, password) = credentials();
        seed(&app_data, email.clone(), password.clone()).await.unwrap();

        let report = seed(&app_data, email, password).await.unwrap();

        assert_eq!(report, SeedReport::default());
        let operations = operation::Entity::find().count(&app_data.db).await.unwrap();
        assert_eq!(operations, 11);
    }

    #[tokio::test]
    async fn test_seed_without_credentials_skips_account() {
        let (app_data, _) = setup_test_app().await;

        let report = seed(&app_data, None, Some(TEST_PASSWORD.to_string()))
            .await
            .unwrap();

        assert!(report.role_created);
        assert!(!report.super_admin_created);
        let user = admin_user_store::find_active_by_email(&app_data.db, SUPER_ADMIN_EMAIL)
            .await
            .unwrap();
        assert!(user.is_none());
    }
}
