//! Then steps for task HTTP API BDD scenarios.

use super::world::TaskApiWorld;
use rstest_bdd_macros::then;

#[then("the response status is {status:u16}")]
fn response_status_is(world: &TaskApiWorld, status: u16) -> Result<(), eyre::Report> {
    let actual = world
        .last_status
        .ok_or_else(|| eyre::eyre!("no request has been sent"))?;
    if actual.as_u16() != status {
        return Err(eyre::eyre!(
            "expected status {status}, got {actual} with body {}",
            world.last_body
        ));
    }
    Ok(())
}

#[then(r#"the response task is titled "{title}""#)]
fn response_task_titled(world: &TaskApiWorld, title: String) -> Result<(), eyre::Report> {
    if world.last_body["title"] != title.as_str() {
        return Err(eyre::eyre!(
            "expected title {title:?}, got {}",
            world.last_body["title"]
        ));
    }
    Ok(())
}

#[then(r#"the response task is due at "{due_date}""#)]
fn response_task_due_at(world: &TaskApiWorld, due_date: String) -> Result<(), eyre::Report> {
    if world.last_body["due_date"] != due_date.as_str() {
        return Err(eyre::eyre!(
            "expected due date {due_date:?}, got {}",
            world.last_body["due_date"]
        ));
    }
    Ok(())
}

#[then("the response matches the created task")]
fn response_matches_created(world: &TaskApiWorld) -> Result<(), eyre::Report> {
    let created = world
        .created_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))?;
    if &world.last_body != created {
        return Err(eyre::eyre!(
            "expected {created}, got {}",
            world.last_body
        ));
    }
    Ok(())
}

#[then("the response task is completed")]
fn response_task_completed(world: &TaskApiWorld) -> Result<(), eyre::Report> {
    if world.last_body["completed"] != true || !world.last_body["completed_at"].is_string() {
        return Err(eyre::eyre!(
            "expected a completed task, got {}",
            world.last_body
        ));
    }
    Ok(())
}

#[then(r#"the error message is "{message}""#)]
fn error_message_is(world: &TaskApiWorld, message: String) -> Result<(), eyre::Report> {
    if world.last_body["error"] != message.as_str() {
        return Err(eyre::eyre!(
            "expected error {message:?}, got {}",
            world.last_body
        ));
    }
    Ok(())
}
