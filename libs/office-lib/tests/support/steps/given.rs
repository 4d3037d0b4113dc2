use cucumber::given;

use office_lib::repository::models::{RoleRow, UserRow};

use crate::support::world::TestWorld;

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(|s| s.as_str()).unwrap_or("")
}

#[given("the following roles exist:")]
pub async fn roles_exist(world: &mut TestWorld, step: &cucumber::gherkin::Step) {
    if let Some(table) = &step.table {
        let mut roles = world.roles.lock().unwrap();
        for row in table.rows.iter().skip(1) {
            roles.push(RoleRow {
                id: cell(row, 0).parse().expect("role id should be an integer"),
                name: cell(row, 1).to_string(),
            });
        }
    }
}

#[given("the following users exist:")]
pub async fn users_exist(world: &mut TestWorld, step: &cucumber::gherkin::Step) {
    if let Some(table) = &step.table {
        let mut users = world.users.lock().unwrap();
        let mut links = world.links.lock().unwrap();
        for row in table.rows.iter().skip(1) {
            let id = users.len() as i32 + 1;
            let username = cell(row, 0).to_string();
            users.push(UserRow {
                id,
                name: username.clone(),
                last_name: "Seeded".to_string(),
                username,
                email: cell(row, 1).to_string(),
            });
            let role_id: i32 = cell(row, 2).parse().expect("role id should be an integer");
            links.push((id, role_id));
        }
    }
}
