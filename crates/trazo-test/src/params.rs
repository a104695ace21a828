//! Regression test parameters and operations

use trazo_core::Pix;

/// Regression test parameters
///
/// Tracks the state of a regression test: the test name, the index of
/// the current check, and the failures recorded so far.
pub struct RegParams {
    /// Name of the test (e.g., "ccbord")
    pub test_name: String,
    /// Current check index (incremented before each check)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    pub fn new(test_name: &str) -> Self {
        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current check index
    pub fn index(&self) -> usize {
        self.index
    }

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();
        // NaN never compares within delta
        if diff <= delta {
            return true;
        }
        let msg = format!(
            "Failure in {}_reg: value comparison for index {}\n\
             difference = {} but allowed delta = {}\n\
             expected = {}, actual = {}",
            self.test_name, self.index, diff, delta, expected, actual
        );
        self.fail(msg)
    }

    /// Compare two Pix images for exact equality
    pub fn compare_pix(&mut self, pix1: &Pix, pix2: &Pix) -> bool {
        self.index += 1;

        if pix1.width() != pix2.width()
            || pix1.height() != pix2.height()
            || pix1.depth() != pix2.depth()
        {
            let msg = format!(
                "Failure in {}_reg: pix comparison for index {} - dimension mismatch",
                self.test_name, self.index
            );
            return self.fail(msg);
        }

        for y in 0..pix1.height() {
            for x in 0..pix1.width() {
                if pix1.get_pixel(x, y) != pix2.get_pixel(x, y) {
                    let msg = format!(
                        "Failure in {}_reg: pix comparison for index {} - pixel mismatch at ({}, {})",
                        self.test_name, self.index, x, y
                    );
                    return self.fail(msg);
                }
            }
        }

        true
    }

    /// Compare two byte strings
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;
        if data1 == data2 {
            return true;
        }
        let msg = format!(
            "Failure in {}_reg: string comparison for index {}\n\
             expected: {}\n\
             actual:   {}",
            self.test_name,
            self.index,
            String::from_utf8_lossy(data1),
            String::from_utf8_lossy(data2)
        );
        self.fail(msg)
    }

    /// Record a boolean check
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if condition {
            return true;
        }
        let msg = format!(
            "Failure in {}_reg: check for index {} - {}",
            self.test_name, self.index, what
        );
        self.fail(msg)
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trazo_core::PixelDepth;

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("params_values");
        assert!(rp.compare_values(1.0, 1.05, 0.1));
        assert!(!rp.compare_values(1.0, 2.0, 0.1));
        assert!(!rp.compare_values(1.0, f64::NAN, 0.1));
        assert_eq!(rp.index(), 3);
        assert_eq!(rp.failures().len(), 2);
        assert!(!rp.cleanup());
    }

    #[test]
    fn test_compare_pix() {
        let mut rp = RegParams::new("params_pix");
        let a = Pix::new(4, 4, PixelDepth::Bit1).unwrap();
        let mut b = a.to_mut();
        assert!(rp.compare_pix(&a, &a.deep_clone()));
        b.set_pixel(1, 1, 1).unwrap();
        assert!(!rp.compare_pix(&a, &b.into()));
        let c = Pix::new(5, 4, PixelDepth::Bit1).unwrap();
        assert!(!rp.compare_pix(&a, &c));
        assert!(!rp.is_success());
    }

    #[test]
    fn test_compare_strings_and_check() {
        let mut rp = RegParams::new("params_strings");
        assert!(rp.compare_strings(b"optima", b"optima"));
        assert!(rp.check(true, "always"));
        assert!(rp.cleanup());
    }
}
