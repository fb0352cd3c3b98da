use std::backtrace::{Backtrace, BacktraceStatus};

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize)]
pub struct ApiResponse<T: Serialize> {
    status_code: u16,
    data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { status_code: 200, data }
    }
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// 处理函数中的任意错误，统一渲染为纯文本的 500 响应，附带错误链与调用栈
pub struct ApiError {
    title: &'static str,
    error: anyhow::Error,
    /// anyhow 未捕获调用栈时（未设置 RUST_LIB_BACKTRACE）在这里补上
    backtrace: Option<Backtrace>,
}

impl ApiError {
    /// 响应正文的第一句
    pub fn with_title(mut self, title: &'static str) -> Self {
        self.title = title;
        self
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(value: E) -> Self {
        let error = value.into();
        let backtrace = match error.backtrace().status() {
            BacktraceStatus::Captured => None,
            _ => Some(Backtrace::force_capture()),
        };
        Self {
            title: "Error handling request",
            error,
            backtrace,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("请求处理失败：{:#}", self.error);
        // Debug 输出包含错误链，以及 anyhow 自己捕获的调用栈
        let mut body = format!("{}: {:?}", self.title, self.error);
        if let Some(backtrace) = &self.backtrace {
            body.push_str(&format!("\n\nStack backtrace:\n{}", backtrace));
        }
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Context;
    use axum::body::to_bytes;

    use super::*;

    async fn body_text(error: ApiError) -> (StatusCode, String) {
        let response = error.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_api_error_body_contains_chain_and_backtrace() {
        let error: Result<(), std::io::Error> = Err(std::io::Error::other("disk unplugged"));
        let error = ApiError::from(error.context("读取已发布单集失败").unwrap_err());
        let (status, body) = body_text(error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.starts_with("Error handling request: 读取已发布单集失败"));
        assert!(body.contains("Caused by:"));
        assert!(body.contains("disk unplugged"));
        assert!(body.contains("Stack backtrace:"));
    }

    #[tokio::test]
    async fn test_api_error_title() {
        let error = ApiError::from(anyhow::anyhow!("broken")).with_title("Error generating feed");
        let (_, body) = body_text(error).await;
        assert!(body.starts_with("Error generating feed: broken"));
    }
}
