use crate::{
    cli::{
        actions::bootstrap::{bootstrap, enter},
        globals::GlobalArgs,
    },
    routes,
};
use anyhow::Result;

/// # Errors
/// Returns an error if the session is signed out or the request fails.
pub async fn execute_lessons(globals: GlobalArgs) -> Result<()> {
    let app = bootstrap(&globals).await?;
    enter(&app.ctx, &routes::LESSONS)?;

    let lessons = app.api.list_lessons().await?;
    if lessons.is_empty() {
        println!("no lessons yet");
    }
    for lesson in lessons {
        let mark = if lesson.completed { "x" } else { " " };
        println!(
            "[{mark}] {} ({}/{})",
            lesson.title, lesson.course_id, lesson.id
        );
    }

    Ok(())
}

/// # Errors
/// Returns an error if the session is signed out or the request fails.
pub async fn execute_reviews(globals: GlobalArgs) -> Result<()> {
    let app = bootstrap(&globals).await?;
    enter(&app.ctx, &routes::REVIEWS)?;

    let reviews = app.api.list_due_reviews().await?;
    if reviews.is_empty() {
        println!("nothing due");
    }
    for review in reviews {
        println!("{}  {}  (lesson {})", review.due_at, review.prompt, review.lesson_id);
    }

    Ok(())
}
