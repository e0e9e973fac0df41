//! Stack synthesis integration tests

#[cfg(test)]
mod tests {
    use db_seeds::config::StackConfig;
    use db_seeds::infra::{OutputValue, Resource, synthesize, users_service_stack};
    use serde_json::Value;

    fn stack_config(stage: &str) -> StackConfig {
        StackConfig {
            stage: stage.to_string(),
            account: Some("123456789012".to_string()),
            ..StackConfig::default()
        }
    }

    #[test]
    fn test_template_shape() {
        let template = synthesize(&users_service_stack(&stack_config("dev"))).unwrap();
        let json: Value = serde_json::from_str(&template.to_json_pretty().unwrap()).unwrap();

        assert_eq!(json["AWSTemplateFormatVersion"], "2010-09-09");
        let resources = json["Resources"].as_object().unwrap();
        let mut ids: Vec<&String> = resources.keys().collect();
        ids.sort();
        assert_eq!(ids, vec!["UserCreatedDLQ", "UserCreatedQueue", "UsersTable"]);
        assert_eq!(json["Outputs"].as_object().unwrap().len(), 5);

        let dlq = &json["Resources"]["UserCreatedDLQ"]["Properties"];
        assert_eq!(dlq["QueueName"], "user-created-dlq-dev");
        assert_eq!(dlq["MessageRetentionPeriod"], 14 * 24 * 3600);
        assert!(dlq.get("RedrivePolicy").is_none());
    }

    #[test]
    fn test_stage_changes_names_and_protection() {
        let dev = synthesize(&users_service_stack(&stack_config("dev"))).unwrap();
        let prod = synthesize(&users_service_stack(&stack_config("prod"))).unwrap();

        let dev_table = &dev.resources["UsersTable"]["Properties"];
        let prod_table = &prod.resources["UsersTable"]["Properties"];
        assert_eq!(dev_table["TableName"], "users-service-db-dev");
        assert_eq!(prod_table["TableName"], "users-service-db-prod");
        assert_eq!(
            dev_table["PointInTimeRecoverySpecification"]["PointInTimeRecoveryEnabled"],
            false
        );
        assert_eq!(
            prod_table["PointInTimeRecoverySpecification"]["PointInTimeRecoveryEnabled"],
            true
        );
        assert_eq!(
            prod.outputs["UserCreatedDLQUrl"]["Export"]["Name"],
            "UserCreatedDLQUrl-prod"
        );
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let config = stack_config("staging");
        let first = synthesize(&users_service_stack(&config)).unwrap();
        let second = synthesize(&users_service_stack(&config)).unwrap();
        assert_eq!(
            first.to_json_pretty().unwrap(),
            second.to_json_pretty().unwrap()
        );
    }

    #[test]
    fn test_invalid_definition_is_not_rendered() {
        let mut stack = users_service_stack(&stack_config("dev"));
        stack.outputs.push(stack.outputs[0].clone());
        assert!(synthesize(&stack).is_err());

        let mut stack = users_service_stack(&stack_config("dev"));
        stack.outputs[1].value = OutputValue::GetAtt("Nowhere".into(), "Arn".into());
        assert!(synthesize(&stack).is_err());
    }

    #[test]
    fn test_definition_exposes_account_and_region() {
        let stack = users_service_stack(&stack_config("dev"));
        assert_eq!(stack.account.as_deref(), Some("123456789012"));
        assert_eq!(stack.region, "us-east-1");
        assert!(matches!(stack.resource("UsersTable"), Some(Resource::Table(_))));
    }
}
