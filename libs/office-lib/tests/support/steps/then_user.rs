use cucumber::then;

use office_lib::errors_service::ErrorCode;

use crate::support::world::TestWorld;

#[then(expr = "the response code should be {int}")]
pub async fn response_code(world: &mut TestWorld, code: i32) {
    let result = world.create_result.as_ref().expect("Result should exist");
    let envelope = result.as_ref().expect("create should not raise");
    assert_eq!(envelope.code(), code);
}

#[then(expr = "the response message should be {string}")]
pub async fn response_message(world: &mut TestWorld, message: String) {
    let result = world.create_result.as_ref().expect("Result should exist");
    let envelope = result.as_ref().expect("create should not raise");
    assert_eq!(envelope.message(), message);
}

#[then("the response should have no body")]
pub async fn response_without_body(world: &mut TestWorld) {
    let result = world.create_result.as_ref().expect("Result should exist");
    assert!(result.as_ref().unwrap().body().is_none());
}

#[then(expr = "the created user should have {int} roles")]
pub async fn created_user_roles(world: &mut TestWorld, count: usize) {
    let user = world.current_user.as_ref().expect("User should exist");
    assert_eq!(user.roles.len(), count);
}

#[then(expr = "{int} users should be stored")]
pub async fn stored_users(world: &mut TestWorld, count: usize) {
    assert_eq!(world.users.lock().unwrap().len(), count);
}

#[then("the user should be found")]
pub async fn user_found(world: &mut TestWorld) {
    let result = world.optional_user_result.as_ref().expect("Result should exist");
    assert!(result.is_ok());
    assert!(result.as_ref().unwrap().is_some());
}

#[then("the user should not be found")]
pub async fn user_not_found(world: &mut TestWorld) {
    let result = world.optional_user_result.as_ref().expect("Result should exist");
    assert!(result.is_ok());
    assert!(result.as_ref().unwrap().is_none());
}

#[then(expr = "the user should have {int} roles")]
pub async fn user_has_roles(world: &mut TestWorld, count: usize) {
    let user = world.current_user.as_ref().expect("User should exist");
    assert_eq!(user.roles.len(), count);
}

#[then(expr = "I should receive {int} users")]
pub async fn receive_users_count(world: &mut TestWorld, count: usize) {
    let result = world.paginated_users_result.as_ref().expect("Result should exist");
    assert!(result.is_ok());
    assert_eq!(result.as_ref().unwrap().data.len(), count);
}

#[then(expr = "the total count should be {int}")]
pub async fn total_count(world: &mut TestWorld, count: u64) {
    let result = world.paginated_users_result.as_ref().expect("Result should exist");
    assert_eq!(result.as_ref().unwrap().total, count);
}

#[then("the update should be successful")]
pub async fn update_successful(world: &mut TestWorld) {
    let result = world.update_result.as_ref().expect("Result should exist");
    let envelope = result.as_ref().unwrap();
    assert_eq!(envelope.code(), 0);
    assert_eq!(envelope.body(), Some(&true));
}

#[then(expr = "user {int} should have last name {string}")]
pub async fn user_last_name(world: &mut TestWorld, user_id: i32, last_name: String) {
    let user = world.service().find(user_id).await.unwrap().expect("User should exist");
    assert_eq!(user.last_name, last_name);
}

#[then("the deletion should be successful")]
pub async fn deletion_successful(world: &mut TestWorld) {
    assert!(world.delete_result.take().expect("Result should exist").is_ok());
}

#[then("the operation should fail with OFFICE_NOT_FOUND")]
pub async fn fails_with_not_found(world: &mut TestWorld) {
    let error = world.error.take().expect("Error should exist");
    assert_eq!(error.code(), ErrorCode::OfficeNotFound.code());
}
