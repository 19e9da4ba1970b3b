//! Pipe-delimited permission lists used when writing zone and section
//! permissions, e.g. `alice|true|true|false|bob|true|false|false`.
use serde::{Deserialize, Serialize};

/// Number of `|` separated fields per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionLayout {
    /// `name|canView|canModify|canDelete`
    Standard,
    /// `name|canView|canModify|canDelete|canCreate`
    WithCreate,
}

impl PermissionLayout {
    pub fn group_len(self) -> usize {
        match self {
            PermissionLayout::Standard => 4,
            PermissionLayout::WithCreate => 5,
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum PermissionError {
    #[error("permission entry {index} has invalid flag '{value}' (expected true or false)")]
    InvalidFlag { index: usize, value: String },
    #[error("permission entry '{name}' does not fit the {layout:?} layout")]
    LayoutMismatch { name: String, layout: PermissionLayout },
}

/// One user's or group's grant on a zone or admin section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    #[serde(alias = "username")]
    pub name: String,
    pub can_view: bool,
    pub can_modify: bool,
    pub can_delete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_create: Option<bool>,
}

impl Permission {
    pub fn new(name: impl Into<String>, can_view: bool, can_modify: bool, can_delete: bool) -> Self {
        Permission {
            name: name.into(),
            can_view,
            can_modify,
            can_delete,
            can_create: None,
        }
    }

    pub fn with_create(mut self, can_create: bool) -> Self {
        self.can_create = Some(can_create);
        self
    }
}

/// Serialize entries into the wire string. `can_create` must be set exactly
/// when the layout is `WithCreate`, so the string parses back to `entries`.
pub fn format_permissions(
    entries: &[Permission],
    layout: PermissionLayout,
) -> Result<String, PermissionError> {
    let mut fields: Vec<String> = Vec::with_capacity(entries.len() * layout.group_len());
    for p in entries {
        fields.push(p.name.clone());
        fields.push(p.can_view.to_string());
        fields.push(p.can_modify.to_string());
        fields.push(p.can_delete.to_string());
        match (layout, p.can_create) {
            (PermissionLayout::Standard, None) => {}
            (PermissionLayout::WithCreate, Some(can_create)) => fields.push(can_create.to_string()),
            _ => {
                return Err(PermissionError::LayoutMismatch {
                    name: p.name.clone(),
                    layout,
                });
            }
        }
    }
    Ok(fields.join("|"))
}

/// Parse the wire string. A trailing group with too few fields is dropped
/// without error; the server has been seen to truncate these strings.
pub fn parse_permissions(
    input: &str,
    layout: PermissionLayout,
) -> Result<Vec<Permission>, PermissionError> {
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let fields: Vec<&str> = input.split('|').collect();
    fields
        .chunks_exact(layout.group_len())
        .enumerate()
        .map(|(index, group)| {
            let flag = |value: &str| parse_flag(index, value);
            Ok(Permission {
                name: group[0].to_string(),
                can_view: flag(group[1])?,
                can_modify: flag(group[2])?,
                can_delete: flag(group[3])?,
                can_create: match layout {
                    PermissionLayout::Standard => None,
                    PermissionLayout::WithCreate => Some(flag(group[4])?),
                },
            })
        })
        .collect()
}

fn parse_flag(index: usize, value: &str) -> Result<bool, PermissionError> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(PermissionError::InvalidFlag {
            index,
            value: value.to_string(),
        })
    }
}
