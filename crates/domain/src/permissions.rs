//! Predefined IAM permission sets

use std::collections::BTreeSet;

pub const APPFLOW_READ_WRITE: &[&str] = &[
    "appflow:TagResource",
    "appflow:DescribeFlow",
    "appflow:StartFlow",
    "appflow:StopFlow",
];

pub const S3_READ: &[&str] = &["s3:ListBucket", "s3:GetObject", "s3:GetBucketLocation"];

pub const S3_WRITE: &[&str] = &["s3:PutObject", "s3:DeleteObject"];

pub const LOGS_PERMISSIONS: &[&str] = &[
    "logs:CreateLogGroup",
    "logs:CreateLogStream",
    "logs:PutLogEvents",
];

/// Names accepted by [`named_set`]
pub const SET_NAMES: [&str; 4] = ["appflow_read_write", "s3_read", "s3_write", "logs"];

/// Look up a predefined set by name
pub fn named_set(name: &str) -> Option<&'static [&'static str]> {
    match name.to_ascii_lowercase().as_str() {
        "appflow_read_write" => Some(APPFLOW_READ_WRITE),
        "s3_read" => Some(S3_READ),
        "s3_write" => Some(S3_WRITE),
        "logs" | "logs_permissions" => Some(LOGS_PERMISSIONS),
        _ => None,
    }
}

/// Union of permission lists without duplicates, sorted
pub fn join_permissions(lists: &[&[&str]]) -> Vec<String> {
    lists
        .iter()
        .flat_map(|list| list.iter())
        .map(|p| p.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_removes_duplicates() {
        let joined = join_permissions(&[S3_READ, S3_WRITE, S3_READ]);
        assert_eq!(joined.len(), 5);
        assert!(joined.contains(&"s3:GetObject".to_string()));
        assert!(joined.contains(&"s3:PutObject".to_string()));
    }

    #[test]
    fn test_join_is_sorted() {
        let joined = join_permissions(&[LOGS_PERMISSIONS, APPFLOW_READ_WRITE]);
        let mut sorted = joined.clone();
        sorted.sort();
        assert_eq!(joined, sorted);
    }

    #[test]
    fn test_named_set_lookup() {
        for name in SET_NAMES {
            assert!(named_set(name).is_some(), "{}", name);
        }
        assert_eq!(named_set("S3_WRITE"), Some(S3_WRITE));
        assert!(named_set("ec2_admin").is_none());
    }
}
