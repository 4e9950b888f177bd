//! Integration tests for ndarray support
//!
//! These cover the ndarray-facing workflow: convert, persist, append, load.

#![cfg(feature = "ndarray")]

use ndarray::{Array2, ArrayD, array, s};
use npyfile::{Array, Error, Mode, NpyFile, read, save};

#[test]
fn roundtrip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nd.npy");

    let matrix = array![[1.0f64, 2.0, 3.0], [4.0, 5.0, 6.0]].into_dyn();
    let expected = matrix.clone();

    save(&path, &Array::from_ndarray(matrix).unwrap(), Mode::Write).unwrap();

    let back: ArrayD<f64> = read(&path).unwrap().to_ndarray().unwrap();
    assert_eq!(back, expected);
}

#[test]
fn streaming_rows_accumulate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stream.npy");

    let mut file = NpyFile::open(&path, Mode::Append).unwrap();
    for i in 0..4 {
        let rows = Array2::<f32>::from_elem((25, 8), i as f32).into_dyn();
        file.append(&Array::from_ndarray(rows).unwrap()).unwrap();
    }
    file.close();

    let merged: ArrayD<f32> = read(&path).unwrap().to_ndarray().unwrap();
    assert_eq!(merged.shape(), &[100, 8]);
    assert_eq!(merged[[0, 0]], 0.0);
    assert_eq!(merged[[99, 7]], 3.0);
}

#[test]
fn non_contiguous_append_rejected_before_any_io() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contig.npy");

    let full = Array2::<i64>::zeros((10, 10)).into_dyn();
    save(&path, &Array::from_ndarray(full).unwrap(), Mode::Write).unwrap();
    let size_before = std::fs::metadata(&path).unwrap().len();

    // Every other column: owned but not in standard layout
    let strided = Array2::<i64>::zeros((10, 10))
        .slice_move(s![.., ..;2])
        .into_dyn();
    assert!(!strided.is_standard_layout());

    let result = Array::from_ndarray(strided);
    assert!(matches!(result, Err(Error::NotContiguous)));

    // Nothing reached the file
    assert_eq!(std::fs::metadata(&path).unwrap().len(), size_before);
    let loaded: ArrayD<i64> = read(&path).unwrap().to_ndarray().unwrap();
    assert_eq!(loaded.shape(), &[10, 10]);
}

#[test]
fn standard_layout_copy_of_strided_data_appends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("relayout.npy");

    let base = Array2::<u32>::from_shape_fn((6, 8), |(r, c)| (r * 8 + c) as u32);
    save(
        &path,
        &Array::from_ndarray(base.clone().into_dyn()).unwrap(),
        Mode::Write,
    )
    .unwrap();

    // Every other row, relaid out into standard order before appending
    let strided = base.slice_move(s![..;2, ..]);
    assert!(!strided.is_standard_layout());
    let contiguous = strided.as_standard_layout().into_owned().into_dyn();
    save(&path, &Array::from_ndarray(contiguous).unwrap(), Mode::Append).unwrap();

    let merged: ArrayD<u32> = read(&path).unwrap().to_ndarray().unwrap();
    assert_eq!(merged.shape(), &[9, 8]);
    assert_eq!(merged[[6, 0]], 0);
    assert_eq!(merged[[7, 0]], 16);
}
