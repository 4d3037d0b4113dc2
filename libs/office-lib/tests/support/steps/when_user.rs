use cucumber::when;

use office_lib::entities::{PaginationParams, User, UserDraft};

use crate::support::world::TestWorld;

/// Parses "1,2" into role ids; "none" stands for an empty list.
fn parse_roles(roles: &str) -> Vec<i32> {
    if roles == "none" {
        return vec![];
    }
    roles
        .split(',')
        .map(|r| r.trim().parse().expect("role id should be an integer"))
        .collect()
}

#[when(expr = "I create user {string} with email {string} and roles {string}")]
pub async fn create_user(world: &mut TestWorld, username: String, email: String, roles: String) {
    let draft = UserDraft {
        username,
        email,
        name: "test".to_string(),
        last_name: "ortiz".to_string(),
        roles: parse_roles(&roles),
    };

    let result = world.service().create(draft).await;
    world.current_user = result
        .as_ref()
        .ok()
        .and_then(|envelope| envelope.body().cloned());
    world.create_result = Some(result);
}

#[when(expr = "I look up user {int}")]
pub async fn find_user(world: &mut TestWorld, user_id: i32) {
    let result = world.service().find(user_id).await;
    world.current_user = result.as_ref().ok().cloned().flatten();
    world.optional_user_result = Some(result);
}

#[when(expr = "I list users with limit {int} and offset {int}")]
pub async fn list_users(world: &mut TestWorld, limit: u32, offset: u64) {
    let pagination = PaginationParams::new(Some(limit), Some(offset));
    world.paginated_users_result = Some(world.service().find_users(pagination).await);
}

#[when(expr = "I update user {int} with last name {string}")]
pub async fn update_user(world: &mut TestWorld, user_id: i32, last_name: String) {
    let service = world.service();
    let mut user = match service.find(user_id).await {
        Ok(Some(user)) => user,
        _ => User {
            id: user_id,
            username: "ghost".to_string(),
            email: "ghost@company.net".to_string(),
            name: "Ghost".to_string(),
            last_name: String::new(),
            roles: vec![],
        },
    };
    user.last_name = last_name;

    match service.update(user).await {
        Err(e) => world.error = Some(e),
        ok => world.update_result = Some(ok),
    }
}

async fn run_delete(world: &mut TestWorld, user_id: i32) {
    match world.service().delete(user_id).await {
        Err(e) => world.error = Some(e),
        ok => world.delete_result = Some(ok),
    }
}

#[when(expr = "I delete user {int}")]
pub async fn delete_user(world: &mut TestWorld, user_id: i32) {
    run_delete(world, user_id).await;
}

#[when("I delete the created user")]
pub async fn delete_created_user(world: &mut TestWorld) {
    let user_id = world.current_user.as_ref().expect("a user should have been created").id;
    run_delete(world, user_id).await;
}
