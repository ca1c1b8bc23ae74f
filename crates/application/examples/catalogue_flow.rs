use application::ContentApp;
use chrono::{Duration, Utc};
use domain::{ContentInput, DomainError, FilterQuery};

#[tokio::main]
async fn main() -> Result<(), DomainError> {
    let app = ContentApp::in_memory();
    let manager = &app.content_manager;

    let start = Utc::now();
    let input = ContentInput {
        title: "Die Hard".to_string(),
        subtitle: "Christmas Eve at Nakatomi Plaza".to_string(),
        description: "An off-duty cop against a tower full of thieves".to_string(),
        image_url: "https://example.com/die-hard.png".to_string(),
        duration: 132,
        start_time: start,
        end_time: start + Duration::minutes(132),
        genre_list: vec!["Action".to_string()],
    };

    let Some(created) = manager.create(&input).await? else {
        println!("Store declined to create the content");
        return Ok(());
    };
    println!("Created {} ({})", created.title, created.id);

    let genres = vec!["Thriller".to_string(), "Action".to_string()];
    if let Some(updated) = manager.add_genres(created.id, &genres).await? {
        println!("Genres after add: {:?}", updated.genre_list);
    }

    let query = FilterQuery::new(Some("hard".to_string()), Some("thrill".to_string()));
    let matches = manager.get_filtered(&query).await?;
    println!("Filter {:?} matched {} content(s)", query, matches.len());

    let deleted = manager.delete(created.id).await?;
    println!("Deleted {}", deleted);

    Ok(())
}
