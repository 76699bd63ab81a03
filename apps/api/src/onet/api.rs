//! O*NET Web Services client (authenticated JSON API).

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

use crate::models::occupation::{Occupation, OccupationDetail, Section, MAX_ITEMS};
use crate::onet::{DirectoryError, OccupationDirectory};

#[derive(Debug, Deserialize)]
struct SearchDocument {
    #[serde(default)]
    occupation: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    code: String,
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct TaskDocument {
    title: Option<String>,
    #[serde(default)]
    task: Vec<TaskItem>,
}

#[derive(Debug, Deserialize)]
struct TaskItem {
    #[serde(default)]
    statement: String,
}

#[derive(Debug, Deserialize)]
struct ElementDocument {
    #[serde(default)]
    element: Vec<Element>,
}

/// A named descriptor. Technology skills carry the name under `title.name`.
#[derive(Debug, Deserialize)]
struct Element {
    name: Option<String>,
    title: Option<ElementTitle>,
}

#[derive(Debug, Deserialize)]
struct ElementTitle {
    name: Option<String>,
}

impl Element {
    fn label(self) -> String {
        self.name
            .or_else(|| self.title.and_then(|t| t.name))
            .unwrap_or_default()
    }
}

impl ElementDocument {
    fn labels(self) -> Vec<String> {
        self.element
            .into_iter()
            .take(MAX_ITEMS)
            .map(Element::label)
            .collect()
    }
}

/// Client for `services.onetcenter.org`. Credentials are sent as HTTP Basic auth.
pub struct OnetApiClient {
    client: Client,
    base_url: String,
    username: String,
    password: Option<String>,
}

impl OnetApiClient {
    /// `credential` is `username:password`; a bare value is sent as the username.
    pub fn new(client: Client, base_url: String, credential: &str) -> Self {
        let (username, password) = match credential.split_once(':') {
            Some((user, pass)) => (user.to_string(), Some(pass.to_string())),
            None => (credential.to_string(), None),
        };
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
            password,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, &str)],
    ) -> Result<T, DirectoryError> {
        let mut request = self
            .client
            .get(&url)
            .basic_auth(&self.username, self.password.as_deref())
            .header("Accept", "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status {
                url,
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }

    fn section_url(&self, code: &str, section: Section) -> String {
        format!(
            "{}/occupations/{}/{}",
            self.base_url,
            code,
            section.api_path()
        )
    }

    async fn elements(&self, code: &str, section: Section) -> Result<Vec<String>, DirectoryError> {
        let document: ElementDocument = self.get_json(self.section_url(code, section), &[]).await?;
        Ok(document.labels())
    }
}

#[async_trait]
impl OccupationDirectory for OnetApiClient {
    async fn search(&self, keyword: &str) -> Result<Vec<Occupation>, DirectoryError> {
        let url = format!("{}/search", self.base_url);
        let document: SearchDocument = self.get_json(url, &[("keyword", keyword)]).await?;

        // Uncapped: blanks and duplicates are dropped before the cap is applied.
        Ok(document
            .occupation
            .into_iter()
            .map(|hit| Occupation {
                code: hit.code,
                title: hit.title,
            })
            .collect())
    }

    /// Issues all seven section requests concurrently. Any single failure
    /// fails the whole lookup; there is no partial record.
    async fn details(&self, code: &str) -> Result<OccupationDetail, DirectoryError> {
        let (tasks, skills, knowledge, activities, context, styles, technology) = tokio::try_join!(
            self.get_json::<TaskDocument>(self.section_url(code, Section::Tasks), &[]),
            self.elements(code, Section::Skills),
            self.elements(code, Section::Knowledge),
            self.elements(code, Section::WorkActivities),
            self.elements(code, Section::WorkContext),
            self.elements(code, Section::WorkStyles),
            self.elements(code, Section::TechnologySkills),
        )?;

        let title = tasks
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| code.to_string());

        let mut detail = OccupationDetail::new(code, title);
        detail.set_section(
            Section::Tasks,
            tasks.task.into_iter().map(|t| t.statement).collect(),
        );
        detail.set_section(Section::Skills, skills);
        detail.set_section(Section::Knowledge, knowledge);
        detail.set_section(Section::WorkActivities, activities);
        detail.set_section(Section::WorkContext, context);
        detail.set_section(Section::WorkStyles, styles);
        detail.set_section(Section::TechnologySkills, technology);

        debug!("Fetched O*NET details for {code} via web services");

        Ok(detail)
    }
}
