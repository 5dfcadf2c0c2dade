use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::TempDir;

use ride_recommender::data::DatasetError;
use ride_recommender::data::filter::{Selection, rank_candidates};
use ride_recommender::data::loader::load_file;
use ride_recommender::data::model::CellValue;

const HEADER: &str = "make,model,assigned_topic,make_cluster_perc,assigned_topic_cluster_perc,\
sentiment,sentiment_score,cluster,vehicle_title,review,text_for_clustering,strengths,weaknesses,rating";

fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

fn dataset_error(path: &Path) -> DatasetError {
    let err = load_file(path).unwrap_err();
    match err.downcast::<DatasetError>() {
        Ok(e) => e,
        Err(other) => panic!("expected DatasetError, got: {other:#}"),
    }
}

#[test]
fn loads_csv_with_quoted_text() {
    let dir = TempDir::new().unwrap();
    let csv = format!(
        "{HEADER}\n\
         Toyota,Camry,comfort,0.8,0.5,positive,0.9,3,2024 Toyota Camry,\"Quiet, roomy\",smooth ride,space,noise,4.5\n\
         Honda,Civic,other,0.4,0.2,negative,0.7,1,2024 Honda Civic,\"Fine\",economy,mpg,seats,3\n"
    );
    let path = write_file(&dir, "reviews.csv", &csv);

    let table = load_file(&path).unwrap();
    assert_eq!(table.len(), 2);
    let camry = &table.records[0];
    assert_eq!(camry.review, "Quiet, roomy");
    assert_eq!(camry.make_cluster_perc, 0.8);
    assert_eq!(camry.cluster, CellValue::Integer(3));
    assert_eq!(camry.rating, CellValue::Float(4.5));
    assert_eq!(table.records[1].rating, CellValue::Float(3.0));
    assert_eq!(table.records[1].rating.to_string(), "3.0");
    assert_eq!(table.topics.iter().collect::<Vec<_>>(), ["comfort"]);
    assert_eq!(table.makes.iter().collect::<Vec<_>>(), ["Honda", "Toyota"]);
}

#[test]
fn missing_value_markers_load_as_null() {
    let dir = TempDir::new().unwrap();
    let csv = format!(
        "{HEADER}\n\
         Toyota,Camry,comfort,0.8,0.5,positive,0.9,3,2024 Toyota Camry,Quiet,smooth,space,noise,N/A\n\
         NA,Civic,comfort,0.4,0.2,positive,0.7,1,2024 Honda Civic,Fine,economy,mpg,seats,4\n\
         Kia,Rio,NULL,0.3,0.3,positive,0.6,2,2024 Kia Rio,Cheap,value,price,power,n/a\n"
    );
    let path = write_file(&dir, "reviews.csv", &csv);

    let table = load_file(&path).unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(table.records[0].rating, CellValue::Null);
    assert_eq!(table.records[0].rating_value(), None);
    // An integer column with gaps is read as float.
    assert_eq!(table.records[1].rating, CellValue::Float(4.0));
    assert_eq!(table.records[1].make, "");
    assert_eq!(table.makes.iter().collect::<Vec<_>>(), ["Kia", "Toyota"]);
    assert_eq!(table.topics.iter().collect::<Vec<_>>(), ["comfort"]);
}

#[test]
fn text_columns_keep_their_raw_values() {
    let dir = TempDir::new().unwrap();
    let csv = format!(
        "{HEADER}\n\
         Aston Martin,007,comfort,0.8,0.5,positive,0.9,3,DB5,Classic,style,looks,cost,5\n\
         Aston Martin,7,comfort,0.7,0.5,positive,0.9,3,Seven,Newer,speed,pace,room,4\n\
         Honda,Camry,comfort,0.4,0.2,positive,0.7,1.50,2024 Honda,Fine,economy,mpg,seats,3\n"
    );
    let path = write_file(&dir, "reviews.csv", &csv);

    let table = load_file(&path).unwrap();
    let models: Vec<_> = table.records.iter().map(|r| r.model.as_str()).collect();
    assert_eq!(models, ["007", "7", "Camry"]);
    assert_eq!(table.records[2].cluster, CellValue::Float(1.5));
    assert_eq!(table.records[0].cluster, CellValue::Float(3.0));

    let ranked = rank_candidates(&table, &Selection::new(Vec::<String>::new(), ["Aston Martin"]));
    assert_eq!(ranked.len(), 2);
}

#[test]
fn missing_file_is_reported_not_panicked() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.csv");
    match dataset_error(&path) {
        DatasetError::NotFound(p) => assert_eq!(p, path),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn missing_columns_are_listed() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "thin.csv", "make,model,sentiment\nKia,Rio,positive\n");
    let err = dataset_error(&path);
    let message = err.to_string();
    match err {
        DatasetError::MissingColumns(cols) => {
            assert!(cols.contains(&"assigned_topic".to_string()));
            assert!(cols.contains(&"rating".to_string()));
            assert!(!cols.contains(&"make".to_string()));
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert!(message.starts_with("Missing columns: assigned_topic"));
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "reviews.xlsx", "whatever");
    assert!(matches!(dataset_error(&path), DatasetError::UnsupportedFormat(ext) if ext == "xlsx"));
}

#[test]
fn loads_json_records() {
    let dir = TempDir::new().unwrap();
    let json = r#"[
        {"make": "Ford", "model": "Mustang", "assigned_topic": "performance",
         "make_cluster_perc": 0.6, "assigned_topic_cluster_perc": 0.7,
         "sentiment": "positive", "sentiment_score": 0.95, "cluster": 2,
         "vehicle_title": "2025 Ford Mustang", "review": "Loud and fun",
         "text_for_clustering": "acceleration", "strengths": "engine",
         "weaknesses": "thirst", "rating": 5}
    ]"#;
    let path = write_file(&dir, "reviews.json", json);

    let table = load_file(&path).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.records[0].vehicle_title, "2025 Ford Mustang");
    assert_eq!(table.records[0].rating, CellValue::Integer(5));
}

#[test]
fn loads_parquet_columns() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reviews.parquet");

    let text = |v: &str| -> ArrayRef { Arc::new(StringArray::from(vec![v])) };
    let float = |v: f64| -> ArrayRef { Arc::new(Float64Array::from(vec![v])) };

    let columns: Vec<(&str, ArrayRef)> = vec![
        ("make", text("Kia")),
        ("model", text("Telluride")),
        ("assigned_topic", text("comfort")),
        ("make_cluster_perc", float(0.3)),
        ("assigned_topic_cluster_perc", float(0.6)),
        ("sentiment", text("positive")),
        ("sentiment_score", float(0.8)),
        ("cluster", Arc::new(Int64Array::from(vec![7])) as ArrayRef),
        ("vehicle_title", text("2024 Kia Telluride")),
        ("review", text("Family hauler")),
        ("text_for_clustering", text("space")),
        ("strengths", text("value")),
        ("weaknesses", text("size")),
        ("rating", float(4.8)),
    ];
    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, array)| Field::new(*name, array.data_type().clone(), false))
            .collect::<Vec<_>>(),
    ));
    assert_eq!(schema.field(7).data_type(), &DataType::Int64);
    let batch =
        RecordBatch::try_new(schema.clone(), columns.into_iter().map(|(_, a)| a).collect()).unwrap();

    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let table = load_file(&path).unwrap();
    assert_eq!(table.len(), 1);
    let record = &table.records[0];
    assert_eq!(record.make, "Kia");
    assert_eq!(record.cluster, CellValue::Integer(7));
    assert_eq!(record.rating_value(), Some(4.8));
}
