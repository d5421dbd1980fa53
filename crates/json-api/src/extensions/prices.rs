//! Price bounds checks.

use salvo::prelude::StatusError;

use crate::extensions::*;

pub(crate) trait PriceExt: Sized {
    /// Reject prices the store cannot hold as `BIGINT`, naming `field` in the 400.
    fn checked_price(self, field: &str) -> Result<Self, StatusError>;
}

impl PriceExt for u64 {
    fn checked_price(self, field: &str) -> Result<Self, StatusError> {
        i64::try_from(self)
            .map(|_| self)
            .or_400(&format!("\"{field}\" is out of range"))
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn accepts_the_largest_storable_price() -> TestResult {
        let max = u64::try_from(i64::MAX)?;

        assert_eq!(max.checked_price("price")?, max);
        assert_eq!(0_u64.checked_price("price")?, 0);

        Ok(())
    }

    #[test]
    fn rejects_prices_beyond_bigint_with_400() {
        let error = u64::MAX.checked_price("price").unwrap_err();

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
        assert!(error.brief.contains("price"));
    }
}
