//! 画面シェルから渡される外部コラボレーター
//!
//! セッション・ルーター・通知はアプリケーションシェルが所有し、
//! コアは明示的に受け取った値だけを使う。

use serde::{Deserialize, Serialize};
use std::fmt;

/// ユーザー種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Employee,
}

/// 現在ログイン中のユーザー情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// 請求書の所有者として記録されるメールアドレス
    pub email: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
    /// APIサーバー用のトークン
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Session {
    pub fn employee(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            user_type: UserType::Employee,
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// 画面遷移先
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Bills,
    NewBill,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Bills => "#employee/bills",
            Route::NewBill => "#employee/bill/new",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// 画面遷移を行うコラボレーター
pub trait Router: Send + Sync {
    fn navigate(&self, route: Route);
}

/// ユーザーへのブロッキング通知（アラート）を行うコラボレーター
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// 遷移履歴を記録するルーター
    #[derive(Default)]
    pub struct RecordingRouter {
        pub visited: Mutex<Vec<Route>>,
    }

    impl RecordingRouter {
        pub fn visited(&self) -> Vec<Route> {
            self.visited.lock().unwrap().clone()
        }
    }

    impl Router for RecordingRouter {
        fn navigate(&self, route: Route) {
            self.visited.lock().unwrap().push(route);
        }
    }

    /// アラート内容を記録する通知
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub alerts: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        pub fn alerts(&self) -> Vec<String> {
            self.alerts.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn alert(&self, message: &str) {
            self.alerts.lock().unwrap().push(message.to_string());
        }
    }
}
