use reqwest::Method;

const PATH_ID_PLACEHOLDER: &str = ":id";

#[derive(Debug, Clone)]
pub struct PathSpec {
    pub path: &'static str,
    pub method: Method,
    /// Short description of the operation, used to build failure messages
    pub action: &'static str,
}

impl PathSpec {
    pub const fn get(path: &'static str, action: &'static str) -> Self {
        Self {
            path,
            method: Method::GET,
            action,
        }
    }

    pub const fn post(path: &'static str, action: &'static str) -> Self {
        Self {
            path,
            method: Method::POST,
            action,
        }
    }

    pub const fn put(path: &'static str, action: &'static str) -> Self {
        Self {
            path,
            method: Method::PUT,
            action,
        }
    }

    pub fn has_id_param(&self) -> bool {
        self.path.contains(PATH_ID_PLACEHOLDER)
    }

    /// Substitutes the `:id` segment. Characters that would change the path
    /// structure are percent encoded.
    pub fn path_with_id(&self, id: &str) -> String {
        debug_assert!(self.has_id_param(), "{} has no id parameter", self.path);
        self.path.replace(PATH_ID_PLACEHOLDER, &encode_path_segment(id))
    }
}

fn encode_path_segment(segment: &str) -> String {
    let mut result = String::with_capacity(segment.len());
    for b in segment.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'@' => {
                result.push(b as char)
            }
            _ => result.push_str(&format!("%{b:02X}")),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::object_id("65f1c0ffee", "/api/user/65f1c0ffee/getuserbyid")]
    #[case::email("mid@clinic.com", "/api/user/mid@clinic.com/getuserbyid")]
    #[case::slash_encoded("a/b", "/api/user/a%2Fb/getuserbyid")]
    #[case::space_encoded("a b", "/api/user/a%20b/getuserbyid")]
    fn id_substitution(#[case] id: &str, #[case] expected: &str) {
        let spec = PathSpec::get("/api/user/:id/getuserbyid", "fetch user");
        assert_eq!(spec.path_with_id(id), expected);
    }
}
