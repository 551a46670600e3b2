use super::error::ApiError;

/// Endpoint path relative to the API base, with positional `{}` slots
/// for parent ids and the record id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathTemplate(pub &'static str);

impl PathTemplate {
    pub fn placeholders(&self) -> usize {
        self.0.matches("{}").count()
    }

    /// Fill every slot in order; segments are percent-encoded.
    pub fn fill(&self, params: &[&str]) -> Result<String, ApiError> {
        let expected = self.placeholders();
        if expected != params.len() {
            return Err(ApiError::InvalidRequest(format!(
                "path {} expects {} parameter(s), got {}",
                self.0,
                expected,
                params.len()
            )));
        }

        let mut out = String::with_capacity(self.0.len() + params.len() * 24);
        let mut rest = self.0;
        for param in params {
            if param.trim().is_empty() {
                return Err(ApiError::InvalidRequest(format!(
                    "empty path parameter for {}",
                    self.0
                )));
            }
            let idx = rest.find("{}").ok_or_else(|| {
                ApiError::InvalidRequest(format!("malformed path template {}", self.0))
            })?;
            out.push_str(&rest[..idx]);
            out.push_str(&urlencoding::encode(param));
            rest = &rest[idx + 2..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_slots_in_order() {
        let t = PathTemplate("/insured/get/{}/{}");
        assert_eq!(t.fill(&["a1", "v9"]).unwrap(), "/insured/get/a1/v9");
    }

    #[test]
    fn encodes_segments() {
        let t = PathTemplate("/company/delete/{}");
        assert_eq!(t.fill(&["a/b c"]).unwrap(), "/company/delete/a%2Fb%20c");
    }

    #[test]
    fn rejects_wrong_arity_and_empty_ids() {
        let t = PathTemplate("/insured/allVec/{}");
        assert!(matches!(t.fill(&[]), Err(ApiError::InvalidRequest(_))));
        assert!(matches!(t.fill(&["x", "y"]), Err(ApiError::InvalidRequest(_))));
        assert!(matches!(t.fill(&[" "]), Err(ApiError::InvalidRequest(_))));
        assert_eq!(PathTemplate("/company/all").fill(&[]).unwrap(), "/company/all");
    }
}
