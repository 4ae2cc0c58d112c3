use super::*;

const ARRAY: &str = "\
TWA\\TWS, 10, 20
0,   2, 4
90,  5, 8
180, 3, 6
";

fn triple_tuples(ts: &[Triple]) -> Vec<(f64, f64, f64)> {
    ts.iter().map(|t| (t.ws(), t.wa(), t.bs())).collect()
}

#[test]
fn array_layout_is_wind_speed_major() {
    let ts = normalize_str(ARRAY, &NormalizeCfg::new(Format::Array)).unwrap();
    assert_eq!(
        triple_tuples(&ts),
        vec![
            (10.0, 0.0, 2.0),
            (10.0, 90.0, 5.0),
            (10.0, 180.0, 3.0),
            (20.0, 0.0, 4.0),
            (20.0, 90.0, 8.0),
            (20.0, 180.0, 6.0),
        ]
    );
}

#[test]
fn array_rejects_ragged_and_missing_cells() {
    let cfg = NormalizeCfg::new(Format::Array);
    let ragged = "x, 10, 20\n0, 2\n90, 5, 8\n";
    assert!(matches!(normalize_str(ragged, &cfg), Err(PolarError::Format(_))));
    let missing = "x, 10, 20\n0, 2, \n90, 5, 8\n";
    assert!(matches!(normalize_str(missing, &cfg), Err(PolarError::Format(_))));
    let no_rows = "x, 10, 20\n";
    assert!(matches!(normalize_str(no_rows, &cfg), Err(PolarError::Format(_))));
    assert!(matches!(normalize_str("", &cfg), Err(PolarError::Format(_))));
}

#[test]
fn triples_data_read_as_array_is_a_format_error() {
    let data = "10, 0, 2\n10, 90, 5\n10, 180, 3, 1\n";
    let cfg = NormalizeCfg::new(Format::Array);
    assert!(matches!(normalize_str(data, &cfg), Err(PolarError::Format(_))));
}

#[test]
fn out_of_domain_values_are_value_errors() {
    let cfg = NormalizeCfg::new(Format::Triples);
    assert!(matches!(
        normalize_str("-5, 10, 2\n", &cfg),
        Err(PolarError::Value(_))
    ));
    assert!(matches!(
        normalize_str("5, 10, -2\n", &cfg),
        Err(PolarError::Value(_))
    ));
    assert!(matches!(
        normalize_str("5, NaN, 2\n", &cfg),
        Err(PolarError::Value(_))
    ));
    let arr = NormalizeCfg::new(Format::Array);
    assert!(matches!(
        normalize_str("x, 0\n10, 1\n", &arr),
        Err(PolarError::Value(_))
    ));
}

#[test]
fn triples_header_and_field_count() {
    let cfg = NormalizeCfg::new(Format::Triples).with_header(true);
    let ts = normalize_str("ws,wa,bs\n12, -45, 7\n", &cfg).unwrap();
    assert_eq!(triple_tuples(&ts), vec![(12.0, 315.0, 7.0)]);

    let no_header = NormalizeCfg::new(Format::Triples);
    assert!(matches!(
        normalize_str("ws,wa,bs\n12, 45, 7\n", &no_header),
        Err(PolarError::Format(_))
    ));
    assert!(matches!(
        normalize_str("12, 45\n", &no_header),
        Err(PolarError::Format(_))
    ));
    assert!(matches!(
        normalize_str("ws,wa,bs\n", &cfg),
        Err(PolarError::Format(_))
    ));
}

#[test]
fn whitespace_and_custom_delimiters() {
    let cfg = NormalizeCfg::new(Format::Array).with_delimiter(Delimiter::Whitespace);
    let ts = normalize_str("TWA/TWS   6   8\n\n45  4.0\t5.0\n90  5.5  6.5\n", &cfg).unwrap();
    assert_eq!(ts.len(), 4);
    assert_eq!((ts[3].ws(), ts[3].wa(), ts[3].bs()), (8.0, 90.0, 6.5));

    let semi = NormalizeCfg::new(Format::Triples).with_delimiter(";".parse().unwrap());
    let ts = normalize_str("6;45;4.5\n", &semi).unwrap();
    assert_eq!(triple_tuples(&ts), vec![(6.0, 45.0, 4.5)]);
}

#[test]
fn format_and_delimiter_tags() {
    assert_eq!("array".parse::<Format>().unwrap(), Format::Array);
    assert_eq!(" Triples ".parse::<Format>().unwrap(), Format::Triples);
    assert!(matches!("matrix".parse::<Format>(), Err(PolarError::Format(_))));
    assert_eq!(Format::Array.to_string(), "array");
    assert_eq!("tab".parse::<Delimiter>().unwrap(), Delimiter::Byte(b'\t'));
    assert_eq!("whitespace".parse::<Delimiter>().unwrap(), Delimiter::Whitespace);
    assert!("::".parse::<Delimiter>().is_err());
}

#[test]
fn normalize_path_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("polar.csv");
    std::fs::write(&path, ARRAY).unwrap();
    let ts = normalize_path(&path, &NormalizeCfg::new(Format::Array)).unwrap();
    assert_eq!(ts.len(), 6);
    assert!(matches!(
        normalize_path(dir.path().join("missing.csv"), &NormalizeCfg::default()),
        Err(PolarError::Io(_))
    ));
}
