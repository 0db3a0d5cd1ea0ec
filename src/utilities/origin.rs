/// Where a request was raised: the cab panel inside the elevator or a hall
/// call button on a floor.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Internal,
    External,
}

impl Origin {
    pub fn as_string(self) -> String {
        match self {
            Origin::Internal => String::from("cab"),
            Origin::External => String::from("hall"),
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_string())
    }
}
