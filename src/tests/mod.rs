use std::path::{Path, PathBuf};

use sqlx::prelude::FromRow;

use crate::{config::RunConfig, deploy, process_data::identity::record_id};


pub(crate) enum Cell {
    S(&'static str),
    N(f64),
    E,
}

use Cell::{E, N, S};

pub(crate) const HEADERS: [&str; 15] = [
    "Name",
    "Completed (km)",
    "Percentage",
    "Distance to 25% (km)",
    "Distance to 50% (km)",
    "Distance to 75% (km)",
    "Distance to 90% (km)",
    "Distance to 99% (km)",
    "Points bonus @ 25%",
    "Points bonus @ 50%",
    "Points bonus @ 75%",
    "Points bonus @ 90%",
    "Points bonus @ 99%",
    "Total (km)",
    "Points",
];

/// Write an export with a title line, the header row and `rows`.
pub(crate) fn write_export(dir: &Path, file_name: &str, rows: &[Vec<Cell>]) -> PathBuf {
    let path = dir.join(file_name);
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Earth progress export").unwrap();
    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(1, col as u16, *header).unwrap();
    }
    for (idx, cells) in rows.iter().enumerate() {
        let row = idx as u32 + 2;
        for (col, cell) in cells.iter().enumerate() {
            match cell {
                S(value) => {
                    sheet.write_string(row, col as u16, *value).unwrap();
                }
                N(value) => {
                    sheet.write_number(row, col as u16, *value).unwrap();
                }
                E => {}
            }
        }
    }
    workbook.save(&path).unwrap();
    path
}

/// Name, completed km, percentage and total km; every other column empty.
pub(crate) fn points_row(name: &'static str, completed: f64, total: f64) -> Vec<Cell> {
    let mut cells = vec![S(name), N(completed), N(completed / total)];
    cells.extend((0..10).map(|_| E));
    cells.push(N(total));
    cells
}

pub(crate) fn label_row(name: &'static str) -> Vec<Cell> {
    vec![S(name)]
}

pub(crate) fn champion_row(name: &'static str, points: f64) -> Vec<Cell> {
    let mut cells = vec![S(name)];
    cells.extend((0..13).map(|_| E));
    cells.push(N(points));
    cells
}

pub(crate) fn sample_rows() -> Vec<Vec<Cell>> {
    vec![
        points_row("Earth", 1200.0, 40000.0),
        label_row("East Asia"),
        points_row("-Japan", 300.0, 3000.0),
        label_row("Achievements Japan"),
        points_row("--Tokyo", 120.0, 600.0),
        points_row("Shibuya", 20.0, 80.0),
        champion_row("Monthly champion", 420.0),
        label_row("Bonus points Tokyo"),
        label_row("Europe"),
        points_row("-Germany", 90.0, 900.0),
        points_row("Berlin-Mitte", 30.0, 60.0),
    ]
}

pub(crate) async fn open_output(config: &RunConfig) -> deploy::local::db::LocalDatabase {
    deploy::local::db::LocalDatabase::create(&config.database)
        .await
        .unwrap()
}

#[derive(FromRow, Debug, PartialEq)]
pub(crate) struct PointsRow {
    pub id: String,
    pub pure_name: String,
    pub full_name: String,
    pub region: bool,
    pub completed_in_km: Option<f64>,
    pub total_in_km: Option<f64>,
    pub level_2: Option<String>,
    pub level_3: Option<String>,
    pub updated: String,
}

#[derive(FromRow, Debug, PartialEq)]
pub(crate) struct ChampionRow {
    pub id: String,
    pub full_name: String,
    pub name: String,
    pub points: Option<f64>,
    pub updated: String,
}

pub(crate) async fn points_rows(db: &deploy::local::db::LocalDatabase) -> Vec<PointsRow> {
    sqlx::query_as::<_, PointsRow>(
        "SELECT id, pure_name, full_name, region, completed_in_km, total_in_km, level_2, level_3, updated FROM points ORDER BY pure_name",
    )
    .fetch_all(db.pool())
    .await
    .unwrap()
}

pub(crate) async fn champion_rows(db: &deploy::local::db::LocalDatabase) -> Vec<ChampionRow> {
    sqlx::query_as::<_, ChampionRow>(
        "SELECT id, full_name, name, points, updated FROM champions ORDER BY id",
    )
    .fetch_all(db.pool())
    .await
    .unwrap()
}

#[tokio::test]
async fn convert_export() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_export(dir.path(), "earth-05-03-24.xlsx", &sample_rows());
    let config = RunConfig::from_input(&input)
        .unwrap()
        .with_database_dir(dir.path());
    assert_eq!(config.database, dir.path().join("earth-05-03-24.db"));

    let summary = crate::run(&config).await.unwrap();
    assert_eq!(summary.points, 2);
    assert_eq!(summary.champions, 1);

    let db = open_output(&config).await;
    let shibuya_name = ["East Asia", "", "", "Japan", "Tokyo", "", "", "", "", "", "", "Shibuya"]
        .join(" > ");
    let berlin_name = [
        "Europe",
        "",
        "",
        "Germany",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        "BerlinMitte",
    ]
    .join(" > ");
    assert_eq!(
        points_rows(&db).await,
        [
            PointsRow {
                id: record_id(&berlin_name),
                pure_name: "BerlinMitte".into(),
                full_name: berlin_name.clone(),
                region: true,
                completed_in_km: Some(30.0),
                total_in_km: Some(60.0),
                level_2: Some("Germany".into()),
                level_3: None,
                updated: "2024-03-05".into(),
            },
            PointsRow {
                id: record_id(&shibuya_name),
                pure_name: "Shibuya".into(),
                full_name: shibuya_name.clone(),
                region: false,
                completed_in_km: Some(20.0),
                total_in_km: Some(80.0),
                level_2: Some("Japan".into()),
                level_3: Some("Tokyo".into()),
                updated: "2024-03-05".into(),
            },
        ]
    );

    let champion_name =
        ["East Asia", "", "", "Japan", "Tokyo", "", "", "", "", "", ""].join(" > ");
    assert_eq!(
        champion_rows(&db).await,
        [ChampionRow {
            id: record_id(&champion_name),
            full_name: champion_name.clone(),
            name: "Monthly champion".into(),
            points: Some(420.0),
            updated: "2024-03-05".into(),
        }]
    );
}

#[tokio::test]
async fn columns_follow_records() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_export(dir.path(), "earth-05-03-24.xlsx", &sample_rows());
    let config = RunConfig::from_input(&input)
        .unwrap()
        .with_database_dir(dir.path());
    crate::run(&config).await.unwrap();

    let db = open_output(&config).await;
    let executor = crate::job::JobExecutor { db: db.client() };
    let points = executor.table_columns("points").await.unwrap();
    assert_eq!(
        &points[..10],
        [
            "id",
            "pure_name",
            "full_name",
            "region",
            "completed_in_km",
            "percentage",
            "distance_to_25_in_km",
            "distance_to_50_in_km",
            "distance_to_75_in_km",
            "updated",
        ]
    );
    for column in ["name", "total_in_km", "points_bonus_at_99", "level_continent", "level_3", "points"] {
        assert!(points.iter().any(|name| name == column), "{column} missing");
    }

    let champions = executor.table_columns("champions").await.unwrap();
    assert!(champions.iter().any(|name| name == "level_continent"));
    assert!(!champions.iter().any(|name| name == "completed (km)"));
}

#[tokio::test]
async fn headers_with_punctuation() {
    use indexmap::IndexMap;

    use crate::{
        ErrorContext,
        spreadsheet::{CellValue, RawRow},
    };

    let rows = vec![
        RawRow {
            line: 3,
            cells: IndexMap::from([("Name".to_owned(), CellValue::String("Europe".into()))]),
        },
        RawRow {
            line: 4,
            cells: IndexMap::from([
                ("Name".to_owned(), CellValue::String("Lisbon".into())),
                ("Completed (km)".to_owned(), CellValue::Number(3.5)),
                ("Visitor's Note".to_owned(), CellValue::String("windy".into())),
                (r#"Route \ "Alt""#.to_owned(), CellValue::String("coast".into())),
            ]),
        },
    ];
    let updated = chrono::NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    let tables =
        crate::process_data::convert(&ErrorContext::new("earth-05-03-24.xlsx"), rows, updated)
            .unwrap();

    let db = deploy::local::db::LocalDatabase::open("sqlite::memory:")
        .await
        .unwrap();
    let executor = crate::job::JobExecutor { db: db.client() };
    executor.batch(&tables).await.unwrap();
    executor.batch(&tables).await.unwrap();

    #[derive(FromRow, Debug, PartialEq)]
    struct NoteRow {
        note: String,
        route: String,
        completed_in_km: f64,
    }
    assert_eq!(
        sqlx::query_as::<_, NoteRow>(
            r#"SELECT "visitor's note" AS note, "route \ ""alt""" AS route, completed_in_km FROM points"#
        )
        .fetch_all(db.pool())
        .await
        .unwrap(),
        [NoteRow {
            note: "windy".into(),
            route: "coast".into(),
            completed_in_km: 3.5,
        }]
    );
    assert_eq!(executor.table_columns("champions").await.unwrap().len(), 5);
}

#[tokio::test]
async fn text_in_measure_columns_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let mut paris = points_row("Paris", 1.0, 2.0);
    paris[2] = S("n/a");
    let mut champion = champion_row("Monthly champion", 7.0);
    champion[2] = N(0.42);
    let input = write_export(
        dir.path(),
        "earth-05-03-24.xlsx",
        &[label_row("Europe"), paris, champion],
    );
    let config = RunConfig::from_input(&input)
        .unwrap()
        .with_database_dir(dir.path());
    let summary = crate::run(&config).await.unwrap();
    assert_eq!(summary.points, 1);

    let db = open_output(&config).await;
    let (kind, percentage) = sqlx::query_as::<_, (String, String)>(
        "SELECT typeof(percentage), CAST(percentage AS TEXT) FROM points",
    )
    .fetch_one(db.pool())
    .await
    .unwrap();
    assert_eq!((kind.as_str(), percentage.as_str()), ("text", "n/a"));

    let (percentage,) = sqlx::query_as::<_, (f64,)>("SELECT percentage FROM champions")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(percentage, 0.42);
}
