use pepmut::engine::scoring::DEFAULT_Z;

pub struct DefaultsConfig {
    pub z: f64,
    pub matrix_suffix: &'static str,
    pub y_suffix: &'static str,
    pub error_suffix: &'static str,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            z: DEFAULT_Z,
            matrix_suffix: "_as_P.txt",
            y_suffix: "_Y.csv",
            error_suffix: "_I.csv",
        }
    }
}
