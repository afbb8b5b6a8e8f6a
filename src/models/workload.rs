/// Aggregated view of one (provider, account, service, region) slice over the
/// query window. Derived per request, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Workload {
    /// Stored provider key, uppercase.
    pub provider: String,
    /// `cloud_accounts` row id the records point at.
    pub account_id: i32,
    /// Provider-native identifier, resolved from the account row.
    pub account_identifier: String,
    pub service: String,
    pub region: String,
    pub total_cost: f64,
    pub avg_cpu: Option<f64>,
}

impl Workload {
    /// Display id: `{account_identifier}:{service}@{region}`.
    pub fn workload_id(&self) -> String {
        format!(
            "{}:{}@{}",
            self.account_identifier, self.service, self.region
        )
    }

    /// Comparison-group key. Case differences in service/region spelling
    /// across providers must not split a group.
    pub fn group_key(&self) -> (String, String) {
        (self.service.to_lowercase(), self.region.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Workload {
        Workload {
            provider: "AWS".to_string(),
            account_id: 1,
            account_identifier: "aws-default-account".to_string(),
            service: "Compute".to_string(),
            region: "US-East-1".to_string(),
            total_cost: 200.0,
            avg_cpu: Some(65.0),
        }
    }

    #[test]
    fn test_workload_id_shape() {
        assert_eq!(
            sample().workload_id(),
            "aws-default-account:Compute@US-East-1"
        );
    }

    #[test]
    fn test_group_key_lowercases_service_and_region() {
        assert_eq!(
            sample().group_key(),
            ("compute".to_string(), "us-east-1".to_string())
        );
    }
}
