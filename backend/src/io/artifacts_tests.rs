#[cfg(test)]
mod tests {
    use crate::error::EcoError;
    use crate::io::artifacts::{
        load_features, load_model, load_target, save_features, save_model, save_target,
    };
    use crate::models::AqiModel;
    use ndarray::{array, Array1, Array2};
    use tempfile::TempDir;

    #[test]
    fn test_features_reload_bit_for_bit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("processed").join("X_train.bin");
        let features: Array2<f64> = array![
            [0.1 + 0.2, 1.0 / 3.0, f64::MIN_POSITIVE],
            [-0.0, 1e308, 2.718281828459045],
            [f64::EPSILON, 123456.789, -7.25],
        ];

        save_features(&path, &features).unwrap();
        let loaded = load_features(&path).unwrap();

        assert_eq!(loaded.shape(), features.shape());
        for (a, b) in loaded.iter().zip(features.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_target_reload_bit_for_bit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("y_train.bin");
        let target: Array1<f64> = array![42.0, 0.1 + 0.2, -1.5e-300];

        save_target(&path, &target).unwrap();
        let loaded = load_target(&path).unwrap();

        assert_eq!(
            loaded.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
            target.iter().map(|v| v.to_bits()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_empty_matrix_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("X_train.bin");
        let features = Array2::<f64>::zeros((0, 3));

        save_features(&path, &features).unwrap();
        assert_eq!(load_features(&path).unwrap().nrows(), 0);
    }

    #[test]
    fn test_wrong_column_count_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("X_train.bin");
        save_features(&path, &Array2::<f64>::zeros((2, 4))).unwrap();

        assert!(matches!(load_features(&path), Err(EcoError::Data(_))));
    }

    #[test]
    fn test_model_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model").join("aqi_model.json");

        save_model(&path, &AqiModel::new([1.0, 2.0, 3.0], 4.0)).unwrap();
        let replacement = AqiModel::new([-0.5, 0.25, 9.0], -1.0);
        save_model(&path, &replacement).unwrap();

        assert_eq!(load_model(&path).unwrap(), replacement);
    }

    #[test]
    fn test_missing_model_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result = load_model(dir.path().join("absent.json"));
        assert!(matches!(result, Err(EcoError::Io { .. })));
    }
}
