//! Given steps for task HTTP API BDD scenarios.

use super::when::post_task;
use super::world::TaskApiWorld;
use axum::http::StatusCode;
use rstest_bdd_macros::given;
use serde_json::json;

#[given("an empty task store")]
fn empty_task_store(world: &mut TaskApiWorld) {
    *world = TaskApiWorld::new();
}

#[given(r#"a task titled "{title}" exists"#)]
fn task_exists(world: &mut TaskApiWorld, title: String) -> Result<(), eyre::Report> {
    post_task(world, &json!({ "title": title }))?;
    if world.last_status != Some(StatusCode::CREATED) {
        return Err(eyre::eyre!(
            "scenario setup failed to create task: {:?} {}",
            world.last_status,
            world.last_body
        ));
    }
    Ok(())
}
