use crate::models::Row;
use crate::rules::CategoryRule;

pub struct CategorizeResult {
    pub rules_matched: usize,
    pub assignments: usize,
}

fn describe(rule: &CategoryRule) -> String {
    format!(
        "{} - {}",
        rule.description.as_ref().map_or("N/A", |k| k.as_str()),
        rule.category.as_deref().unwrap_or("N/A"),
    )
}

/// Apply every rule in order to every row. No short-circuit: a later rule
/// overwrites whatever an earlier one assigned.
pub fn categorize_rows(rows: &mut [Row], rules: &[CategoryRule]) -> CategorizeResult {
    let mut rules_matched = 0usize;
    let mut assignments = 0usize;

    for rule in rules {
        let hits: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| rule.matches(&row.description, &row.category))
            .map(|(i, _)| i)
            .collect();
        if hits.is_empty() {
            continue;
        }
        log::info!(
            "mapping '{}' to '{}' ({} rows)",
            describe(rule),
            rule.target,
            hits.len()
        );
        for i in &hits {
            rows[*i].category = rule.target.clone();
        }
        rules_matched += 1;
        assignments += hits.len();
    }

    CategorizeResult {
        rules_matched,
        assignments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Value;
    use crate::rules::{Keyword, RuleSet};

    fn row(description: &str, category: &str) -> Row {
        Row {
            line: 2,
            date: "05/11/2024".to_string(),
            description: description.to_string(),
            value: Value::Amount(10.0),
            account: "Cartão".to_string(),
            category: category.to_string(),
            installment: None,
        }
    }

    fn rule(target: &str, desc: Option<&str>, cat: Option<&str>) -> CategoryRule {
        CategoryRule {
            target: target.to_string(),
            description: desc.map(|d| Keyword::new(d).unwrap()),
            category: cat.map(str::to_string),
        }
    }

    #[test]
    fn test_description_rule() {
        let mut rows = vec![row("IFOOD *RESTAURANTE", "Restaurante"), row("Posto Shell", "Auto")];
        let result = categorize_rows(&mut rows, &[rule("Alimentação", Some("ifood"), None)]);
        assert_eq!(rows[0].category, "Alimentação");
        assert_eq!(rows[1].category, "Auto");
        assert_eq!(result.rules_matched, 1);
        assert_eq!(result.assignments, 1);
    }

    #[test]
    fn test_category_rule_is_exact() {
        let mut rows = vec![row("A", "Supermercado"), row("B", "supermercado"), row("C", "Supermercados")];
        categorize_rows(&mut rows, &[rule("Mercado", None, Some("Supermercado"))]);
        assert_eq!(rows[0].category, "Mercado");
        assert_eq!(rows[1].category, "supermercado");
        assert_eq!(rows[2].category, "Supermercados");
    }

    #[test]
    fn test_both_criteria_are_anded() {
        let mut rows = vec![row("UBER TRIP", "Serviços"), row("UBER EATS", "Restaurante")];
        categorize_rows(&mut rows, &[rule("Transporte", Some("uber"), Some("Serviços"))]);
        assert_eq!(rows[0].category, "Transporte");
        assert_eq!(rows[1].category, "Restaurante");
    }

    #[test]
    fn test_last_matching_rule_wins() {
        let mut rows = vec![row("AMAZON PRIME", "Serviços")];
        categorize_rows(
            &mut rows,
            &[
                rule("Assinaturas", Some("prime"), None),
                rule("Compras", Some("amazon"), None),
            ],
        );
        assert_eq!(rows[0].category, "Compras");
    }

    #[test]
    fn test_later_rule_sees_earlier_assignment() {
        let mut rows = vec![row("Drogasil", "Saúde")];
        categorize_rows(
            &mut rows,
            &[
                rule("Farmácia", Some("drogasil"), None),
                rule("Saúde e Bem-estar", None, Some("Farmácia")),
            ],
        );
        assert_eq!(rows[0].category, "Saúde e Bem-estar");
    }

    #[test]
    fn test_no_match_leaves_rows() {
        let mut rows = vec![row("RANDOM VENDOR", "Outros")];
        let result = categorize_rows(&mut rows, &[rule("X", Some("nothing"), None)]);
        assert_eq!(rows[0].category, "Outros");
        assert_eq!(result.rules_matched, 0);
    }

    #[test]
    fn test_rules_from_config_order() {
        let rules = RuleSet::from_json(
            r#"{"fixed_account": "A", "remove_descriptions": [],
                "category_mappings": {
                    "Second": [{"Description": "loja"}],
                    "First": [{"Description": "loja x"}]
                }}"#,
        )
        .unwrap();
        let mut rows = vec![row("LOJA X", "Outros"), row("LOJA Y", "Outros")];
        categorize_rows(&mut rows, &rules.category_rules);
        assert_eq!(rows[0].category, "First");
        assert_eq!(rows[1].category, "Second");
    }
}
