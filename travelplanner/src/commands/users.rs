//! Account commands

use super::{CommandResponse, Session};
use crate::app::AppState;
use crate::database::User;

pub async fn register(
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
) -> CommandResponse<User> {
    let result = state.users_service.register(name, email, password).await;
    CommandResponse::from_result("register", result, |_| {
        "Registration successful! Please log in.".to_string()
    })
}

pub async fn login(state: &AppState, email: &str, password: &str) -> CommandResponse<User> {
    let result = state.users_service.login(email, password).await;
    CommandResponse::from_result("login", result, |user| format!("Welcome back, {}!", user.name))
}

pub async fn get_profile(state: &AppState, session: &Session) -> CommandResponse<User> {
    let result = match session.require_user() {
        Ok(user_id) => state.users_service.get_user(user_id).await,
        Err(e) => Err(e),
    };
    CommandResponse::from_result("get_profile", result, |_| String::new())
}

pub async fn update_profile(
    state: &AppState,
    session: &Session,
    name: Option<&str>,
    email: Option<&str>,
) -> CommandResponse<User> {
    let result = match session.require_user() {
        Ok(user_id) => state.users_service.update_profile(user_id, name, email).await,
        Err(e) => Err(e),
    };
    CommandResponse::from_result("update_profile", result, |_| {
        "Profile updated successfully".to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::create_test_state;

    #[tokio::test]
    async fn test_register_login_profile() {
        let state = create_test_state().await;

        let registered = register(&state, "Ada", "ada@example.com", "secret1").await;
        assert!(registered.success, "{}", registered.message);

        let logged_in = login(&state, "ada@example.com", "secret1").await;
        assert!(logged_in.success);
        assert_eq!(logged_in.message, "Welcome back, Ada!");

        let session = Session::for_user(logged_in.data.unwrap().id);
        let updated = update_profile(&state, &session, Some("Ada Lovelace"), None).await;
        assert_eq!(updated.data.unwrap().name, "Ada Lovelace");

        let profile = get_profile(&state, &session).await;
        assert_eq!(profile.data.unwrap().email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_failures_are_reported_not_raised() {
        let state = create_test_state().await;

        let response = login(&state, "nobody@example.com", "secret1").await;
        assert!(!response.success);
        assert!(response.data.is_none());

        let response = get_profile(&state, &Session::anonymous()).await;
        assert!(!response.success);
        assert_eq!(response.message, "Please log in first");
    }
}
