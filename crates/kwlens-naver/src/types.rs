//! Wire types for the Naver endpoints.

use serde::{Deserialize, Serialize};

/// `GET /keywordstool` response envelope.
#[derive(Debug, Deserialize)]
pub struct KeywordToolResponse {
    #[serde(rename = "keywordList")]
    pub keyword_list: Option<Vec<serde_json::Value>>,
}

/// One entry of `keywordList`, before normalization.
///
/// Volumes arrive either as numbers or as censored strings like `"< 10"`,
/// so they are kept as raw JSON until [`crate::normalize`] interprets them.
#[derive(Debug, Deserialize)]
pub struct RawKeyword {
    #[serde(rename = "relKeyword")]
    pub rel_keyword: String,
    #[serde(rename = "monthlyPcQcCnt")]
    pub monthly_pc_qc_cnt: serde_json::Value,
    #[serde(rename = "monthlyMobileQcCnt")]
    pub monthly_mobile_qc_cnt: serde_json::Value,
    #[serde(rename = "compIdx", default)]
    pub comp_idx: Option<String>,
    #[serde(rename = "monthlyAvePcClkCnt", default)]
    pub monthly_ave_pc_clk_cnt: Option<serde_json::Value>,
    #[serde(rename = "monthlyAveMobileClkCnt", default)]
    pub monthly_ave_mobile_clk_cnt: Option<serde_json::Value>,
    #[serde(rename = "monthlyAvePcCtr", default)]
    pub monthly_ave_pc_ctr: Option<serde_json::Value>,
    #[serde(rename = "monthlyAveMobileCtr", default)]
    pub monthly_ave_mobile_ctr: Option<serde_json::Value>,
    #[serde(rename = "plAvgDepth", default)]
    pub pl_avg_depth: Option<serde_json::Value>,
}

/// `GET /v1/search/{vertical}.json` response; only the total is read.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub total: Option<i64>,
}

/// `POST /v1/datalab/search` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatalabRequest {
    pub start_date: String,
    pub end_date: String,
    pub time_unit: String,
    pub keyword_groups: Vec<KeywordGroup>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordGroup {
    pub group_name: String,
    pub keywords: Vec<String>,
}

/// `results` and `data` are optional so their absence surfaces as a
/// data-shape error instead of an empty series.
#[derive(Debug, Deserialize)]
pub struct DatalabResponse {
    pub results: Option<Vec<DatalabResult>>,
}

#[derive(Debug, Deserialize)]
pub struct DatalabResult {
    pub data: Option<Vec<DatalabPoint>>,
}

#[derive(Debug, Deserialize)]
pub struct DatalabPoint {
    pub period: String,
    pub ratio: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datalab_request_uses_camel_case() {
        let body = DatalabRequest {
            start_date: "2024-01-01".to_string(),
            end_date: "2024-03-31".to_string(),
            time_unit: "month".to_string(),
            keyword_groups: vec![KeywordGroup {
                group_name: "coffee".to_string(),
                keywords: vec!["coffee".to_string()],
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["startDate"], "2024-01-01");
        assert_eq!(json["endDate"], "2024-03-31");
        assert_eq!(json["timeUnit"], "month");
        assert_eq!(json["keywordGroups"][0]["groupName"], "coffee");
        assert_eq!(json["keywordGroups"][0]["keywords"][0], "coffee");
    }

    #[test]
    fn raw_keyword_accepts_mixed_count_types() {
        let raw: RawKeyword = serde_json::from_value(serde_json::json!({
            "relKeyword": "coffee",
            "monthlyPcQcCnt": "< 10",
            "monthlyMobileQcCnt": 1200,
            "compIdx": "중간"
        }))
        .unwrap();
        assert_eq!(raw.rel_keyword, "coffee");
        assert!(raw.monthly_pc_qc_cnt.is_string());
        assert!(raw.monthly_mobile_qc_cnt.is_number());
        assert!(raw.monthly_ave_pc_ctr.is_none());
    }

    #[test]
    fn datalab_response_keeps_missing_fields_distinct_from_empty() {
        let missing: DatalabResponse = serde_json::from_str("{}").unwrap();
        assert!(missing.results.is_none());

        let empty: DatalabResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert_eq!(empty.results.map(|r| r.len()), Some(0));

        let no_data: DatalabResponse =
            serde_json::from_str(r#"{"results": [{"title": "coffee"}]}"#).unwrap();
        assert!(no_data.results.unwrap()[0].data.is_none());
    }
}
