//! Full product lifecycle against the filesystem.

use std::fs;
use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use pds4_product::{ProductError, ProductObservational, TableHandle};
use pds4_table::{StateError, TableError};

const TEMPLATE: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
    <Product_Observational xmlns=\"http://pds.nasa.gov/pds4/pds/v1\">\n\
        <Identification_Area>\n\
            <logical_identifier>urn:nasa:pds:demo:$product</logical_identifier>\n\
        </Identification_Area>\n\
    </Product_Observational>\n";

fn sample_product(dir: &tempfile::TempDir) -> (ProductObservational, TableHandle) {
    let template_path = dir.path().join("template.xml");
    fs::write(&template_path, TEMPLATE).unwrap();

    let mut product = ProductObservational::new(&template_path)
        .unwrap()
        .with_created(Utc.with_ymd_and_hms(2026, 8, 25, 9, 30, 0).unwrap());
    let obs = product.declare_table_character("OBSERVATIONS");
    product
        .declare_field(obs, "%-10s", "ASCII_String", "id", "N/A", "identifier")
        .unwrap();
    product
        .declare_field(obs, "%+6.2f", "ASCII_Real", "value", "m", "measurement")
        .unwrap();
    (product, obs)
}

#[test]
fn product_writes_data_file_and_label() {
    let dir = tempfile::tempdir().unwrap();
    let (mut product, obs) = sample_product(&dir);

    let data_path = dir.path().join("obs_001.tab");
    product.new_product(&data_path).unwrap();
    product.set_metadata("$product", "obs_001").unwrap();
    product
        .add_record(obs, &["abc".into(), 3.14.into()])
        .unwrap();
    product
        .add_record(obs, &["def".into(), (-1.5).into()])
        .unwrap();
    product.close_product().unwrap();

    let data = fs::read(&data_path).unwrap();
    assert_eq!(data, b"abc       ,  +3.14\r\ndef       ,  -1.50\r\n");

    let label = fs::read_to_string(dir.path().join("obs_001.xml")).unwrap();
    assert!(label.contains("urn:nasa:pds:demo:obs_001"));
    assert!(label.contains("<file_name>obs_001.tab</file_name>"));
    assert!(label.contains("<creation_date_time>2026-08-25T09:30:00Z</creation_date_time>"));
    assert!(label.contains("<offset unit=\"byte\">0</offset>"));
    assert!(label.contains("<records>2</records>"));
    assert!(label.contains("<record_length unit=\"byte\">20</record_length>"));
    assert!(label.contains("<field_location unit=\"byte\">13</field_location>"));
    // The label and data agree: 2 records of 20 bytes.
    assert_eq!(data.len(), 40);
}

#[test]
fn product_object_is_reusable_across_products() {
    let dir = tempfile::tempdir().unwrap();
    let (mut product, obs) = sample_product(&dir);

    product.new_product(dir.path().join("obs_001.tab")).unwrap();
    product
        .add_record(obs, &["abc".into(), 3.14.into()])
        .unwrap();
    product
        .add_record(obs, &["def".into(), 2.72.into()])
        .unwrap();
    product.close_product().unwrap();

    // Second product of the same type; counters must restart from zero.
    product.new_product(dir.path().join("obs_002.tab")).unwrap();
    product
        .add_record(obs, &["xyz".into(), 1.0.into()])
        .unwrap();
    assert_eq!(product.table(obs).unwrap().state().record_count(), 1);
    product.close_product().unwrap();

    let second = fs::read_to_string(dir.path().join("obs_002.xml")).unwrap();
    assert!(second.contains("<records>1</records>"));
    assert!(second.contains("<file_name>obs_002.tab</file_name>"));

    // The first product's label still describes the first data file.
    let first = fs::read_to_string(dir.path().join("obs_001.xml")).unwrap();
    assert!(first.contains("<records>2</records>"));
}

#[test]
fn two_tables_share_one_data_file() {
    let dir = tempfile::tempdir().unwrap();
    let (mut product, obs) = sample_product(&dir);
    let housekeeping = product.declare_table_character("HOUSEKEEPING");
    product
        .declare_field(housekeeping, "%5d", "ASCII_Integer", "seq", "N/A", "sequence")
        .unwrap();

    product.new_product(dir.path().join("obs_003.tab")).unwrap();
    product
        .add_record(obs, &["abc".into(), 3.14.into()])
        .unwrap();
    product.add_record(housekeeping, &[7.into()]).unwrap();
    product.close_product().unwrap();

    let label = fs::read_to_string(dir.path().join("obs_003.xml")).unwrap();
    // First table starts at the file head, second right after its record.
    assert!(label.contains("<offset unit=\"byte\">0</offset>"));
    assert!(label.contains("<offset unit=\"byte\">20</offset>"));

    let data = fs::read(dir.path().join("obs_003.tab")).unwrap();
    assert_eq!(&data[20..], b"    7\r\n");
}

#[test]
fn lifecycle_misuse_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (mut product, obs) = sample_product(&dir);

    // Records before the first new_product: the table is unbound.
    let err = product
        .add_record(obs, &["abc".into(), 1.0.into()])
        .unwrap_err();
    assert!(matches!(
        err,
        ProductError::Table(TableError::State(StateError::Unbound { .. }))
    ));

    // Closing with nothing open.
    let err = product.close_product().unwrap_err();
    assert!(matches!(err, ProductError::NoOpenProduct));

    // Opening twice without closing.
    product.new_product(dir.path().join("obs_004.tab")).unwrap();
    let err = product
        .new_product(dir.path().join("obs_005.tab"))
        .unwrap_err();
    assert!(matches!(err, ProductError::ProductStillOpen { .. }));
    product.close_product().unwrap();
}

#[test]
fn failed_record_does_not_abort_earlier_products() {
    let dir = tempfile::tempdir().unwrap();
    let (mut product, obs) = sample_product(&dir);

    product.new_product(dir.path().join("obs_006.tab")).unwrap();
    product
        .add_record(obs, &["abc".into(), 1.0.into()])
        .unwrap();
    product.close_product().unwrap();

    product.new_product(dir.path().join("obs_007.tab")).unwrap();
    let err = product
        .add_record(obs, &["value wider than ten".into(), 1.0.into()])
        .unwrap_err();
    assert!(matches!(
        err,
        ProductError::Table(TableError::Validation(_))
    ));

    // The earlier, finalized product is unaffected.
    let first: PathBuf = dir.path().join("obs_006.tab");
    assert_eq!(
        fs::read(first).unwrap(),
        b"abc       ,  +1.00\r\n"
    );
}
