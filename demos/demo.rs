use colframe::aggregation::{count, mean, sum};
use colframe::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "colframe=trace".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("In-Memory Table Demo\n");

    let people = Table::new(
        [
            ("id", Data::from(vec![1i64, 2, 3, 4, 5])),
            ("name", Data::from(vec!["Alice", "Bob", "Charlie", "Dana", "Eve"])),
            ("team", Data::from(vec!["red", "blue", "red", "green", "blue"])),
            ("age", Data::from(vec![30.0, f64::NAN, 25.0, 41.0, 35.0])),
        ],
        Config::new().enum_column("team", &["red", "green", "blue"]),
    );
    if let Some(error) = people.err() {
        return Err(error.clone());
    }
    println!("{people}\n");

    // Filter and sort
    let adults = people
        .filter(&[Filter::new("age", Comparator::Ge, 30.0)])
        .sort(&[Order::desc("age")]);
    println!("Age >= 30, oldest first:\n{adults}\n");

    // Team order follows the dictionary: red, green, blue
    let by_team = people.filter(&[Filter::new("team", Comparator::Lt, "blue")]);
    println!("Teams before blue:\n{by_team}\n");

    // Aggregate per team
    let stats = people.group_by(&["team"]).aggregate(&[
        count("id").alias("members"),
        mean("age").alias("mean_age"),
        sum("id").alias("id_sum"),
    ]);
    println!("Per team:\n{stats}\n");

    // Derived column
    let labelled = people.apply2("label", "name", "team", |name: Text, team: Text| {
        match (name, team) {
            (Some(name), Some(team)) => Some(format!("{name}@{team}").into()),
            _ => None,
        }
    });
    for label in labelled.view::<Text>("label")?.iter().flatten() {
        println!("  - {label}");
    }

    // Errors stick to the table
    let broken = people.slice(3, 1).sort(&[Order::asc("age")]);
    println!("\nBroken chain: {broken}");

    Ok(())
}
