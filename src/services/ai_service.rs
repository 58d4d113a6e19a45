use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::seq::SliceRandom;
use reqwest::Client;
use serde_json::Value as JsonValue;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::models::analysis::ResumeAnalysis;
use crate::models::assessment::{
    MultipleChoiceDetails, Question, QuestionDetails, QuestionType, ShortAnswerDetails,
};

/// The résumé scoring collaborator. Stateless, possibly slow, possibly
/// failing; no retry state between calls. Retry/degradation policy belongs
/// to the orchestrator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze_resume(
        &self,
        job_description: &str,
        resume_data_uri: &str,
    ) -> Result<ResumeAnalysis>;
}

/// The assessment-generation collaborator: one call in, a sanitized
/// question list out. The caller's only obligation is to persist it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssessmentGenerator: Send + Sync {
    async fn generate_questions(
        &self,
        job_description: &str,
        num_multiple_choice: usize,
        num_short_answer: usize,
    ) -> Result<Vec<Question>>;
}

/// Splits a `data:<mime>;base64,<payload>` URI and checks the payload
/// actually decodes. Anything else never reaches the external service.
pub fn parse_resume_data_uri(uri: &str) -> Result<(String, Vec<u8>)> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| Error::BadRequest("Résumé must be a data URI".to_string()))?;
    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| Error::BadRequest("Résumé data URI must be base64-encoded".to_string()))?;
    if mime.is_empty() {
        return Err(Error::BadRequest(
            "Résumé data URI is missing a MIME type".to_string(),
        ));
    }
    let bytes = BASE64
        .decode(payload)
        .map_err(|_| Error::BadRequest("Résumé data URI payload is not valid base64".to_string()))?;
    Ok((mime.to_string(), bytes))
}

#[derive(Clone)]
pub struct AiService {
    client: Client,
    api_key: String,
}

impl AiService {
    pub fn new(api_key: String, client: Client) -> Self {
        Self { client, api_key }
    }

    async fn chat_openai(&self, payload: JsonValue) -> Result<JsonValue> {
        let res = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&payload)
            .timeout(Duration::from_secs(120))
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(Error::Scoring(format!("OpenAI API Error {}: {}", status, text)));
        }

        let body: JsonValue = res.json().await?;

        body.get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .and_then(|s| serde_json::from_str(s).ok())
            .ok_or_else(|| Error::Scoring("Invalid OpenAI response format".to_string()))
    }

    fn sanitize_questions(&self, raw: &JsonValue, requested: usize) -> Vec<Question> {
        let mut questions = Vec::new();

        let arr_val = if let Some(arr) = raw.get("questions").and_then(|a| a.as_array()) {
            arr.clone()
        } else if let Some(arr) = raw.as_array() {
            arr.clone()
        } else {
            vec![]
        };

        let mut rng = rand::thread_rng();

        for val in arr_val.iter() {
            if let Some(mut q) = coerce_question(val, &mut rng) {
                q.id = (questions.len() as i32) + 1;
                questions.push(q);
            }
        }

        if questions.len() > requested {
            questions.truncate(requested);
        }

        questions
    }
}

fn coerce_question(v: &JsonValue, rng: &mut impl rand::Rng) -> Option<Question> {
    let type_str = v.get("type").and_then(|s| s.as_str()).unwrap_or("multiple_choice");
    let question_text = v.get("question").and_then(|s| s.as_str())?.to_string();

    let (question_type, details) = match type_str {
        "multiple_choice" => {
            let mut options: Vec<String> = v
                .get("options")
                .and_then(|o| o.as_array())
                .map(|a| a.iter().filter_map(|x| x.as_str().map(|s| s.to_string())).collect())
                .unwrap_or_default();

            // Exactly four options, always.
            if options.len() != 4 {
                return None;
            }

            let mut correct = v.get("correct_answer").and_then(|i| i.as_i64()).unwrap_or(0) as i32;
            if !(0..4).contains(&correct) {
                correct = 0;
            }
            let explanation = v.get("explanation").and_then(|s| s.as_str()).map(|s| s.to_string());

            let correct_option = options[correct as usize].clone();
            options.shuffle(rng);
            correct = options.iter().position(|o| o == &correct_option).unwrap_or(0) as i32;

            (
                QuestionType::MultipleChoice,
                QuestionDetails::MultipleChoice(MultipleChoiceDetails {
                    options,
                    correct_answer: correct,
                    explanation,
                }),
            )
        }
        "short_answer" => {
            let ideal_answer = v
                .get("ideal_answer")
                .and_then(|s| s.as_str())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())?;

            (
                QuestionType::ShortAnswer,
                QuestionDetails::ShortAnswer(ShortAnswerDetails { ideal_answer }),
            )
        }
        _ => return None,
    };

    Some(Question {
        id: 0,
        question_type,
        question: question_text,
        details,
    })
}

#[async_trait]
impl ResumeAnalyzer for AiService {
    async fn analyze_resume(
        &self,
        job_description: &str,
        resume_data_uri: &str,
    ) -> Result<ResumeAnalysis> {
        let (mime, _) = parse_resume_data_uri(resume_data_uri)?;

        let system_prompt = r#"You are a critical and unbiased senior HR specialist.
Your task is to strictly evaluate how well a candidate's resume matches a specific vacancy.

Evaluation rules:
1. BE STRICT. If the candidate's core profession is fundamentally different from the vacancy, the ranking MUST be extremely low (0-10).
2. Transferable soft skills are not enough for professional roles.
3. If the vacancy requires a specific qualification or years of experience the candidate clearly lacks, deduct points heavily.
4. Ranking scale:
   - 0-30: fundamental mismatch / lack of core experience.
   - 31-60: some overlap but lacks key professional requirements.
   - 61-80: strong match, lacks some minor details.
   - 81-100: perfect or nearly perfect matching background.

Return JSON: { "candidateRanking": <0-100>, "candidateSummary": "<concise summary of the candidate>", "keySkillsMatch": "<which required skills the resume covers>", "areasForImprovement": "<what is missing or weak>" }"#;

        let content: Vec<JsonValue> = vec![
            serde_json::json!({
                "type": "text",
                "text": format!(
                    "Vacancy:\n{}\n\nPlease analyze the attached resume ({}) and evaluate the candidate's suitability for this position.",
                    job_description, mime
                )
            }),
            serde_json::json!({
                "type": "image_url",
                "image_url": {
                    "url": resume_data_uri,
                    "detail": "high"
                }
            }),
        ];

        let payload = serde_json::json!({
            "model": "gpt-4o",
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": content}
            ],
            "response_format": { "type": "json_object" },
            "max_tokens": 1000
        });

        let resp = self.chat_openai(payload).await?;
        let mut analysis: ResumeAnalysis = serde_json::from_value(resp)?;
        analysis.candidate_ranking = analysis.candidate_ranking.clamp(0, 100);

        tracing::info!(ranking = analysis.candidate_ranking, "Resume analysis complete");
        Ok(analysis)
    }
}

#[async_trait]
impl AssessmentGenerator for AiService {
    async fn generate_questions(
        &self,
        job_description: &str,
        num_multiple_choice: usize,
        num_short_answer: usize,
    ) -> Result<Vec<Question>> {
        let requested = num_multiple_choice + num_short_answer;

        let system_prompt = r#"You are a senior technical recruiter and engineering manager.
Generate an assessment test for the vacancy below as a valid JSON object with a 'questions' array.

Rules:
1. Generate exactly the requested number of each question type.
2. 'multiple_choice' questions carry exactly 4 options and a 'correct_answer' index.
3. 'short_answer' questions carry an 'ideal_answer' model answer.
4. Questions should be non-trivial, practical, and test deep understanding.
5. Avoid "All of the above" or "None of the above" options.
6. CRITICAL: VARY the correct_answer index. Do NOT always use 0."#;

        let user_schema = serde_json::json!({
            "job_description": job_description,
            "multiple_choice_count": num_multiple_choice,
            "short_answer_count": num_short_answer,
            "schema_example": {
                "questions": [
                    {
                        "type": "multiple_choice",
                        "question": "Question text...",
                        "options": ["Option 1", "Option 2", "Option 3", "Option 4"],
                        "correct_answer": 2,
                        "explanation": "Why option at index 2 is correct..."
                    },
                    {
                        "type": "short_answer",
                        "question": "Question text...",
                        "ideal_answer": "A model answer covering the expected points."
                    }
                ]
            }
        });

        let payload = serde_json::json!({
            "model": "gpt-4o",
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": serde_json::to_string(&user_schema)?}
            ],
            "response_format": { "type": "json_object" },
            "temperature": 0.8
        });

        let response_json = self.chat_openai(payload).await?;
        let questions = self.sanitize_questions(&response_json, requested);
        tracing::info!(count = questions.len(), "Assessment generation complete");
        Ok(questions)
    }
}
