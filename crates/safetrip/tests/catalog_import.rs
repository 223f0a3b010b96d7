use std::io::Write;

use safetrip::catalog::{parse_incidents, Catalog, CatalogError};
use safetrip::config::CatalogConfig;

fn builtin() -> Catalog {
    Catalog::builtin().expect("built-in catalog validates")
}

#[test]
fn builtin_incidents_survive_a_csv_export() {
    let catalog = builtin();

    let mut writer = csv::Writer::from_writer(Vec::new());
    for incident in catalog.incidents() {
        writer.serialize(incident).expect("row serializes");
    }
    let exported = writer
        .into_inner()
        .map_err(|err| err.into_error())
        .expect("csv flushes");

    let imported = parse_incidents(exported.as_slice()).expect("export parses");
    assert_eq!(imported, catalog.incidents().to_vec());
}

#[test]
fn load_replaces_incidents_from_csv_file() {
    let dir = std::env::temp_dir().join(format!("safetrip-import-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("incidents.csv");

    let mut file = std::fs::File::create(&path).expect("create csv");
    writeln!(
        file,
        "id,lat,lng,location,type,date,description,severity,verified\n\
         1,40.7128,-74.0060,\"New York, New York\",Safety Concern,2024-02-11,Reported stalking,moderate,yes"
    )
    .expect("write csv");

    let config = CatalogConfig {
        catalog_path: None,
        incidents_csv: Some(path.clone()),
    };
    let catalog = Catalog::load(&config).expect("catalog loads");

    assert_eq!(catalog.incidents().len(), 1);
    assert_eq!(catalog.incidents()[0].location, "New York, New York");
    assert!(catalog.incidents()[0].verified);
    assert_eq!(catalog.questions(), builtin().questions());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn load_reports_missing_catalog_file() {
    let config = CatalogConfig {
        catalog_path: Some("/nonexistent/safetrip/catalog.json".into()),
        incidents_csv: None,
    };
    assert!(matches!(Catalog::load(&config), Err(CatalogError::Io(_))));
}
