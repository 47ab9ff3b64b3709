//! Symptom checker: ranks diseases by how many of the queried symptoms they share

use std::collections::BTreeSet;

use crate::entities::SymptomMatch;

/// Lower-cased, trimmed, non-empty tokens of a comma-separated list
pub fn tokenize(list: &str) -> BTreeSet<String> {
    list.split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Match a symptom query against `(name, details, symptoms)` records.
///
/// Diseases without symptoms are skipped. Results are ordered by descending
/// match count, then by name.
pub fn match_symptoms<'a, I>(query: &str, diseases: I) -> Vec<SymptomMatch>
where
    I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
{
    let wanted = tokenize(query);
    if wanted.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<SymptomMatch> = diseases
        .into_iter()
        .filter_map(|(name, details, symptoms)| {
            let all = tokenize(symptoms);
            if all.is_empty() {
                return None;
            }

            let matched: Vec<String> = all.intersection(&wanted).cloned().collect();
            if matched.is_empty() {
                return None;
            }

            Some(SymptomMatch {
                name: name.to_string(),
                details: details.to_string(),
                count: matched.len(),
                matched,
                all_symptoms: all.into_iter().collect(),
            })
        })
        .collect();

    matches.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_overlap() {
        let results = match_symptoms("fever,cough", [("fever", "", "fever,chills,headache")]);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "fever");
        assert_eq!(results[0].matched, vec!["fever"]);
        assert_eq!(results[0].all_symptoms, vec!["chills", "fever", "headache"]);
        assert_eq!(results[0].count, 1);
    }

    #[test]
    fn test_ranking_by_count_then_name() {
        let diseases = [
            ("malaria", "", "fever,chills"),
            ("covid-19", "", "fever,cough,loss of smell"),
            ("dengue", "", "fever,joint pain,rash"),
            ("asthma", "", "wheezing"),
        ];

        let results = match_symptoms(" Fever , COUGH,,", diseases);
        let names: Vec<&str> = results.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["covid-19", "dengue", "malaria"]);
        assert_eq!(results[0].count, 2);
        assert_eq!(results[0].matched, vec!["cough", "fever"]);
    }

    #[test]
    fn test_empty_symptom_lists_are_skipped() {
        let results = match_symptoms("fever", [("unknown", "", ""), ("blank", "", " , ")]);
        assert!(results.is_empty());
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        assert!(match_symptoms(" , ", [("fever", "", "fever")]).is_empty());
    }
}
