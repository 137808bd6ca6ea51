use barflow_auth::{create_access_token, verify_token};
use barflow_config::JwtConfig;
use barflow_models::{EmployeeRole, ModulePermission, ModulePermissions, SystemModule};
use uuid::Uuid;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

#[test]
fn test_create_access_token_all_roles() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    for role in EmployeeRole::ALL {
        let token =
            create_access_token(user_id, "staff@example.com", role, None, &jwt_config).unwrap();
        let claims = verify_token(&token, &jwt_config).unwrap();

        assert_eq!(claims.role, role.as_str());
        assert_eq!(claims.employee_role().unwrap(), role);
    }
}

#[test]
fn test_verify_token_success() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();
    let email = "bar@example.com";

    let token =
        create_access_token(user_id, email, EmployeeRole::Bartender, None, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.email, email);
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.role, "bartender");
    assert!(claims.permissions.is_none());
}

#[test]
fn test_token_carries_permission_override() {
    let jwt_config = get_test_jwt_config();
    let overrides = ModulePermissions::new()
        .with(SystemModule::Reports, ModulePermission::READ_ONLY)
        .with(SystemModule::Orders, ModulePermission::EMPTY);

    let token = create_access_token(
        Uuid::new_v4(),
        "waiter@example.com",
        EmployeeRole::Waiter,
        Some(overrides.clone()),
        &jwt_config,
    )
    .unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.permissions, Some(overrides));
}

#[test]
fn test_verify_token_wrong_secret() {
    let jwt_config = get_test_jwt_config();
    let token = create_access_token(
        Uuid::new_v4(),
        "cook@example.com",
        EmployeeRole::Cook,
        None,
        &jwt_config,
    )
    .unwrap();

    let wrong_jwt_config = JwtConfig {
        secret: "different_secret_key".to_string(),
        access_token_expiry: 3600,
    };

    assert!(verify_token(&token, &wrong_jwt_config).is_err());
}

#[test]
fn test_token_expiry_is_set() {
    let jwt_config = get_test_jwt_config();
    let token = create_access_token(
        Uuid::new_v4(),
        "manager@example.com",
        EmployeeRole::Manager,
        None,
        &jwt_config,
    )
    .unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(
        claims.exp - claims.iat,
        jwt_config.access_token_expiry as usize
    );
}

#[test]
fn test_verify_token_malformed() {
    let jwt_config = get_test_jwt_config();
    let malformed_tokens = vec![
        "",
        "invalid.token.here",
        "too.many.parts.here.extra",
        "!!!.invalid.chars",
        "header.payload.",
        ".payload.signature",
    ];

    for token in malformed_tokens {
        assert!(verify_token(token, &jwt_config).is_err());
    }
}
