use csv::{ReaderBuilder, Trim};
use ndarray::{Array1, Array2};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::str::FromStr;

pub fn read_image(file_path: &str) -> Array2<f64> {
    let file = File::open(file_path).unwrap();
    let count_reader = BufReader::new(file);
    let n_lines = count_reader.lines().count() - 1;

    let file = File::open(file_path).unwrap();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(file);

    let n_rows = n_lines;
    let n_columns = reader.headers().unwrap().len();

    let flat_data: Array1<f64> = reader
        .records()
        .into_iter()
        .flat_map(|rec| {
            rec.unwrap()
                .iter()
                .map(|b| f64::from_str(b).unwrap())
                .collect::<Vec<f64>>()
        })
        .collect();

    flat_data
        .into_shape((n_rows, n_columns))
        .expect("Could not deserialize the image fixture")
}

pub fn close_l1(expected: f64, actual: f64, atol: f64) {
    assert!(
        (expected - actual).abs() < atol,
        "{} != {} (atol {})",
        expected,
        actual,
        atol
    );
}
