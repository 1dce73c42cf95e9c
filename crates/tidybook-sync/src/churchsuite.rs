use crate::source::ContactSource;
use crate::{FetchError, Result};
use serde::Deserialize;
use tidybook_core::Contact;
use tracing::debug;

/// One page of the address-book listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactPage {
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    pub no_results: u64,
    pub per_page: u64,
}

impl Pagination {
    pub fn total_pages(&self) -> Result<u64> {
        if self.per_page == 0 {
            return Err(FetchError::Parse(
                "pagination.per_page must be positive".to_string(),
            ));
        }
        Ok(self.no_results.div_ceil(self.per_page))
    }
}

pub trait PageFetcher {
    fn fetch_page(&self, page: u32, per_page: u32) -> Result<ContactPage>;
}

/// Walks pages from 1 until a page comes back empty or the last page reported
/// by the pagination block has been read. Without a pagination block a short
/// page ends the walk.
pub fn fetch_all_pages<F: PageFetcher + ?Sized>(
    fetcher: &F,
    per_page: u32,
) -> Result<Vec<Contact>> {
    let mut all_contacts = Vec::new();
    let mut page = 1u32;

    loop {
        let response = fetcher.fetch_page(page, per_page)?;
        let received = response.contacts.len();
        if received == 0 {
            break;
        }
        all_contacts.extend(response.contacts);
        debug!(page, received, total = all_contacts.len(), "contact page fetched");

        let last_page = match response.pagination {
            Some(pagination) => u64::from(page) >= pagination.total_pages()?,
            None => received < per_page as usize,
        };
        if last_page {
            break;
        }
        page += 1;
    }

    Ok(all_contacts)
}

#[derive(Debug, Clone)]
pub struct ChurchSuiteSource {
    base_url: String,
    api_key: Option<String>,
    account: Option<String>,
    application: String,
    per_page: u32,
}

impl ChurchSuiteSource {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        account: Option<String>,
        application: String,
        per_page: u32,
    ) -> Self {
        Self {
            base_url,
            api_key,
            account,
            application,
            per_page,
        }
    }

    fn credentials(&self) -> Result<(&str, &str)> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(FetchError::MissingSetting("api_key"))?;
        let account = self
            .account
            .as_deref()
            .ok_or(FetchError::MissingSetting("account"))?;
        Ok((api_key, account))
    }
}

impl ContactSource for ChurchSuiteSource {
    fn source_name(&self) -> &'static str {
        "churchsuite"
    }

    fn fetch_contacts(&self) -> Result<Vec<Contact>> {
        let (api_key, account) = self.credentials()?;
        let client =
            imp::HttpPageFetcher::new(&self.base_url, api_key, account, &self.application)?;
        fetch_all_pages(&client, self.per_page)
    }
}

#[cfg(feature = "churchsuite")]
mod imp {
    use super::{ContactPage, PageFetcher};
    use crate::{FetchError, Result};
    use reqwest::blocking::Client;
    use std::time::Duration;
    use url::Url;

    const CONTACTS_PATH: &str = "addressbook/contacts";

    pub struct HttpPageFetcher<'a> {
        client: Client,
        endpoint: Url,
        api_key: &'a str,
        account: &'a str,
        application: &'a str,
    }

    impl<'a> HttpPageFetcher<'a> {
        pub fn new(
            base_url: &str,
            api_key: &'a str,
            account: &'a str,
            application: &'a str,
        ) -> Result<Self> {
            let endpoint = Url::parse(&format!(
                "{}/{}",
                base_url.trim_end_matches('/'),
                CONTACTS_PATH
            ))?;
            if endpoint.scheme() != "https" {
                return Err(FetchError::Parse(
                    "churchsuite base_url must use https".to_string(),
                ));
            }
            let client = Client::builder()
                .user_agent("tidybook")
                .timeout(Duration::from_secs(30))
                .connect_timeout(Duration::from_secs(10))
                .build()?;
            Ok(Self {
                client,
                endpoint,
                api_key,
                account,
                application,
            })
        }
    }

    impl PageFetcher for HttpPageFetcher<'_> {
        fn fetch_page(&self, page: u32, per_page: u32) -> Result<ContactPage> {
            let mut url = self.endpoint.clone();
            url.query_pairs_mut()
                .append_pair("page", &page.to_string())
                .append_pair("per_page", &per_page.to_string());

            let response = self
                .client
                .get(url)
                .header("X-Auth", self.api_key)
                .header("X-Application", self.application)
                .header("X-Account", self.account)
                .header("Accept", "application/json")
                .send()?;

            let status = response.status();
            let body = response.text()?;
            if !status.is_success() {
                return Err(FetchError::Status {
                    status: status.as_u16(),
                    body: body.trim().to_string(),
                });
            }
            Ok(serde_json::from_str(&body)?)
        }
    }
}

#[cfg(not(feature = "churchsuite"))]
mod imp {
    use super::{ContactPage, PageFetcher};
    use crate::{FetchError, Result};

    pub struct HttpPageFetcher;

    impl HttpPageFetcher {
        pub fn new(
            _base_url: &str,
            _api_key: &str,
            _account: &str,
            _application: &str,
        ) -> Result<Self> {
            Err(FetchError::Unavailable(
                "ChurchSuite fetching requires the churchsuite feature".to_string(),
            ))
        }
    }

    impl PageFetcher for HttpPageFetcher {
        fn fetch_page(&self, _page: u32, _per_page: u32) -> Result<ContactPage> {
            Err(FetchError::Unavailable(
                "ChurchSuite fetching requires the churchsuite feature".to_string(),
            ))
        }
    }
}
