//! Real [`PageDriver`] over headless Chromium (chromiumoxide).

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::error::SessionError;
use crate::session::{PageDriver, SessionConfig};

/// One owned browser session: the Chromium process, its CDP event pump,
/// and the single page the run drives.
///
/// Acquired at run start, released with [`ChromiumSession::close`] on every
/// exit path. Nothing is shared between sessions, so concurrent runs each
/// launch their own.
pub struct ChromiumSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: Page,
}

impl ChromiumSession {
    /// Launch Chromium with the session's window size, User-Agent, and
    /// optional proxy, and open a blank page ready for navigation.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Browser`] when the browser cannot be
    /// launched or the initial page cannot be created.
    pub async fn launch(config: &SessionConfig) -> Result<Self, SessionError> {
        let mut builder =
            BrowserConfig::builder().window_size(config.window_width, config.window_height);
        if !config.headless {
            builder = builder.with_head();
        }
        if let Some(ua) = &config.user_agent {
            builder = builder.arg(format!("--user-agent={ua}"));
        }
        if let Some(proxy) = &config.proxy {
            builder = builder.arg(format!("--proxy-server={proxy}"));
        }

        let browser_config = builder.build().map_err(SessionError::Browser)?;
        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| SessionError::Browser(e.to_string()))?;

        // Pump CDP events for the lifetime of the session; the stream ends
        // when the browser process goes away.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| SessionError::Browser(e.to_string()))?;

        Ok(Self {
            browser,
            handler_task,
            page,
        })
    }

    /// Shut the browser down and stop the event pump.
    ///
    /// Failures are logged, not returned: release must succeed from the
    /// caller's perspective on every exit path.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::debug!(error = %e, "browser close request failed");
        }
        if let Err(e) = self.browser.wait().await {
            tracing::debug!(error = %e, "browser did not exit cleanly");
        }
        self.handler_task.abort();
    }
}

fn browser_err(e: chromiumoxide::error::CdpError) -> SessionError {
    SessionError::Browser(e.to_string())
}

#[async_trait]
impl PageDriver for ChromiumSession {
    async fn goto(&self, url: &str) -> Result<(), SessionError> {
        self.page.goto(url).await.map_err(browser_err)?;
        self.page.wait_for_navigation().await.map_err(browser_err)?;
        Ok(())
    }

    async fn exists(&self, selector: &str) -> Result<bool, SessionError> {
        Ok(self.page.find_element(selector).await.is_ok())
    }

    async fn click(&self, selector: &str) -> Result<(), SessionError> {
        let element =
            self.page
                .find_element(selector)
                .await
                .map_err(|_| SessionError::ElementNotFound {
                    selector: selector.to_owned(),
                })?;
        element
            .click()
            .await
            .map_err(|e| SessionError::NotInteractable {
                selector: selector.to_owned(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn click_by_text(&self, selector: &str, text: &str) -> Result<(), SessionError> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|_| SessionError::ElementNotFound {
                selector: selector.to_owned(),
            })?;

        for element in elements {
            let matches = element
                .inner_text()
                .await
                .map_err(browser_err)?
                .is_some_and(|t| t.trim() == text);
            if matches {
                element
                    .click()
                    .await
                    .map_err(|e| SessionError::NotInteractable {
                        selector: selector.to_owned(),
                        reason: e.to_string(),
                    })?;
                return Ok(());
            }
        }

        Err(SessionError::ElementNotFound {
            selector: format!("{selector} with text {text:?}"),
        })
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<(), SessionError> {
        let element =
            self.page
                .find_element(selector)
                .await
                .map_err(|_| SessionError::ElementNotFound {
                    selector: selector.to_owned(),
                })?;
        element
            .click()
            .await
            .map_err(|e| SessionError::NotInteractable {
                selector: selector.to_owned(),
                reason: e.to_string(),
            })?;
        element
            .type_str(text)
            .await
            .map_err(|e| SessionError::NotInteractable {
                selector: selector.to_owned(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn text_of(&self, selector: &str) -> Result<String, SessionError> {
        let element =
            self.page
                .find_element(selector)
                .await
                .map_err(|_| SessionError::ElementNotFound {
                    selector: selector.to_owned(),
                })?;
        let text = element.inner_text().await.map_err(browser_err)?;
        Ok(text.unwrap_or_default())
    }

    async fn scroll_by(&self, delta_y: i64) -> Result<(), SessionError> {
        self.page
            .evaluate(format!("window.scrollBy(0, {delta_y})"))
            .await
            .map_err(browser_err)?;
        Ok(())
    }

    async fn content(&self) -> Result<String, SessionError> {
        self.page.content().await.map_err(browser_err)
    }
}
