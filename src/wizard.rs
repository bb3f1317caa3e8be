//! Project Creation Wizard
//!
//! Four linear steps: basic info, goal & schedule, details, media & plan
//! document. `next` checks the current step's fields before advancing;
//! `prev` never validates. Nothing survives a reload.

use chrono::NaiveDate;

use crate::api::{MultipartBody, UploadFile};

pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 4;
pub const MAX_IMAGES: usize = 5;
pub const MAX_PLAN_BYTES: u64 = 10 * 1024 * 1024;
pub const MIN_TARGET_AMOUNT: i64 = 1_000_000;

/// Categories offered by the wizard, sent as-is
pub const WIZARD_CATEGORIES: [&str; 6] = ["아동복지", "노인복지", "장애인복지", "동물보호", "환경보호", "교육"];

const PLAN_MIME_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];
const PLAN_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

pub const STEP_TITLES: [&str; 4] = ["기본 정보", "목표 및 기간", "상세 설명", "이미지 및 계획서"];

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectWizard {
    pub step: u8,
    pub title: String,
    pub category: String,
    pub organization: String,
    pub target_amount: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub images: Vec<UploadFile>,
    pub plan_document: Option<UploadFile>,
}

impl Default for ProjectWizard {
    fn default() -> Self {
        Self {
            step: FIRST_STEP,
            title: String::new(),
            category: String::new(),
            organization: String::new(),
            target_amount: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
            images: Vec::new(),
            plan_document: None,
        }
    }
}

impl ProjectWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_last_step(&self) -> bool {
        self.step == LAST_STEP
    }

    /// Validate the current step, then advance
    pub fn next(&mut self) -> Result<u8, String> {
        self.validate_step(self.step)?;
        if self.step < LAST_STEP {
            self.step += 1;
        }
        Ok(self.step)
    }

    pub fn prev(&mut self) -> u8 {
        if self.step > FIRST_STEP {
            self.step -= 1;
        }
        self.step
    }

    pub fn validate_step(&self, step: u8) -> Result<(), String> {
        match step {
            1 => {
                if [&self.title, &self.category, &self.organization].iter().any(|f| f.trim().is_empty()) {
                    return Err("모든 필수 항목을 입력해주세요.".to_string());
                }
            }
            2 => {
                if [&self.target_amount, &self.start_date, &self.end_date].iter().any(|f| f.trim().is_empty()) {
                    return Err("모든 필수 항목을 입력해주세요.".to_string());
                }
                let target = self.target().ok_or_else(|| "목표 금액을 숫자로 입력해주세요.".to_string())?;
                if target < MIN_TARGET_AMOUNT {
                    return Err("목표 금액은 최소 100만원 이상이어야 합니다.".to_string());
                }
                let start = parse_date(&self.start_date)?;
                let end = parse_date(&self.end_date)?;
                if start >= end {
                    return Err("종료일은 시작일보다 이후여야 합니다.".to_string());
                }
            }
            3 => {
                if self.description.trim().is_empty() {
                    return Err("프로젝트 상세 설명을 입력해주세요.".to_string());
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Target amount in won, ignoring separators
    pub fn target(&self) -> Option<i64> {
        let digits: String = self.target_amount.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
        digits.parse().ok()
    }

    /// Add picked images, rejecting the whole batch if it would exceed the limit
    pub fn add_images(&mut self, files: Vec<UploadFile>) -> Result<(), String> {
        if self.images.len() + files.len() > MAX_IMAGES {
            return Err(format!("이미지는 최대 {}개까지 업로드 가능합니다.", MAX_IMAGES));
        }
        self.images.extend(files);
        Ok(())
    }

    pub fn remove_image(&mut self, index: usize) {
        if index < self.images.len() {
            self.images.remove(index);
        }
    }

    pub fn set_plan_document(&mut self, file: UploadFile) -> Result<(), String> {
        validate_plan_document(&file.name, &file.mime, file.size())?;
        self.plan_document = Some(file);
        Ok(())
    }

    /// Submitting without a plan document needs the user's confirmation
    pub fn needs_plan_confirmation(&self) -> bool {
        self.plan_document.is_none()
    }

    /// Text fields of the multipart body, in submission order
    pub fn submit_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.trim().to_string()),
            ("category", self.category.clone()),
            ("organization", self.organization.trim().to_string()),
            ("targetAmount", self.target().map(|t| t.to_string()).unwrap_or_default()),
            ("startDate", self.start_date.clone()),
            ("endDate", self.end_date.clone()),
            ("description", self.description.clone()),
        ]
    }

    /// Full multipart body: every step is re-checked first
    pub fn to_multipart(&self) -> Result<MultipartBody, String> {
        for step in FIRST_STEP..LAST_STEP {
            self.validate_step(step)?;
        }
        let mut body = MultipartBody::default();
        for (name, value) in self.submit_fields() {
            body = body.text(name, value);
        }
        body = body.files("images", self.images.iter().cloned());
        if let Some(plan) = &self.plan_document {
            body = body.file("planDocument", plan.clone());
        }
        Ok(body)
    }
}

/// PDF/DOC/DOCX up to 10 MB; the extension is used when the browser gives no type
pub fn validate_plan_document(name: &str, mime: &str, size: u64) -> Result<(), String> {
    let type_ok = if mime.is_empty() {
        let ext = name.rsplit_once('.').map(|(_, e)| e.to_ascii_lowercase()).unwrap_or_default();
        PLAN_EXTENSIONS.contains(&ext.as_str())
    } else {
        PLAN_MIME_TYPES.contains(&mime)
    };
    if !type_ok {
        return Err("PDF, DOC, DOCX 파일만 업로드 가능합니다.".to_string());
    }
    if size > MAX_PLAN_BYTES {
        return Err("파일 크기는 10MB 이하여야 합니다.".to_string());
    }
    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| "날짜 형식이 올바르지 않습니다.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, mime: &str, size: usize) -> UploadFile {
        UploadFile { name: name.to_string(), mime: mime.to_string(), bytes: vec![0; size] }
    }

    fn filled() -> ProjectWizard {
        ProjectWizard {
            title: "겨울 난방비 지원".to_string(),
            category: "노인복지".to_string(),
            organization: "따뜻한마을".to_string(),
            target_amount: "3,000,000".to_string(),
            start_date: "2024-11-01".to_string(),
            end_date: "2025-01-31".to_string(),
            description: "독거 어르신 난방비".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_step_one_requires_basic_info() {
        let mut wizard = ProjectWizard::new();
        wizard.title = "제목".to_string();
        assert_eq!(wizard.next(), Err("모든 필수 항목을 입력해주세요.".to_string()));
        assert_eq!(wizard.step, 1);

        wizard.category = "교육".to_string();
        wizard.organization = "기관".to_string();
        assert_eq!(wizard.next(), Ok(2));
    }

    #[test]
    fn test_step_two_target_and_dates() {
        let mut wizard = filled();
        wizard.step = 2;

        wizard.target_amount = "999999".to_string();
        assert!(wizard.next().unwrap_err().contains("100만원"));

        wizard.target_amount = "1000000".to_string();
        wizard.end_date = wizard.start_date.clone();
        assert!(wizard.next().unwrap_err().contains("종료일"));

        wizard.end_date = "2024-12-01".to_string();
        assert_eq!(wizard.next(), Ok(3));
    }

    #[test]
    fn test_step_three_blank_description() {
        let mut wizard = filled();
        wizard.step = 3;
        wizard.description = "   ".to_string();
        assert!(wizard.next().is_err());
        wizard.description = "내용".to_string();
        assert_eq!(wizard.next(), Ok(4));
        assert!(wizard.is_last_step());
    }

    #[test]
    fn test_prev_skips_validation_and_stops_at_one() {
        let mut wizard = ProjectWizard::new();
        wizard.step = 3;
        assert_eq!(wizard.prev(), 2);
        assert_eq!(wizard.prev(), 1);
        assert_eq!(wizard.prev(), 1);
    }

    #[test]
    fn test_image_limit() {
        let mut wizard = filled();
        let three = vec![file("a.png", "image/png", 1); 3];
        assert!(wizard.add_images(three.clone()).is_ok());
        assert!(wizard.add_images(three).is_err());
        assert_eq!(wizard.images.len(), 3);
        assert!(wizard.add_images(vec![file("b.png", "image/png", 1); 2]).is_ok());
        wizard.remove_image(0);
        wizard.remove_image(99);
        assert_eq!(wizard.images.len(), 4);
    }

    #[test]
    fn test_plan_document_rules() {
        assert!(validate_plan_document("plan.pdf", "application/pdf", 1024).is_ok());
        assert!(validate_plan_document("plan.docx", "", 1024).is_ok());
        assert!(validate_plan_document("plan.hwp", "", 1024).is_err());
        assert!(validate_plan_document("plan.png", "image/png", 10).is_err());
        assert!(validate_plan_document("big.pdf", "application/pdf", MAX_PLAN_BYTES + 1).is_err());
        assert!(validate_plan_document("edge.pdf", "application/pdf", MAX_PLAN_BYTES).is_ok());
    }

    #[test]
    fn test_submit_fields_and_confirmation() {
        let mut wizard = filled();
        assert!(wizard.needs_plan_confirmation());
        let fields = wizard.submit_fields();
        assert!(fields.contains(&("targetAmount", "3000000".to_string())));
        assert_eq!(fields[0], ("title", "겨울 난방비 지원".to_string()));

        wizard.set_plan_document(file("plan.pdf", "application/pdf", 10)).unwrap();
        let body = wizard.to_multipart().unwrap();
        assert_eq!(body.files.len(), 1);
        assert_eq!(body.files[0].0, "planDocument");
    }

    #[test]
    fn test_multipart_rechecks_steps() {
        let mut wizard = filled();
        wizard.title.clear();
        assert!(wizard.to_multipart().is_err());
    }
}
