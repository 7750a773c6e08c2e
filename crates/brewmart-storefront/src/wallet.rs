/// Wallet connection as reported by the external wallet provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletSession {
    address: Option<String>,
}

impl WalletSession {
    #[must_use]
    pub fn connected(address: impl Into<String>) -> Self {
        let address = address.into();
        if address.trim().is_empty() {
            return Self::disconnected();
        }
        Self {
            address: Some(address),
        }
    }

    #[must_use]
    pub fn disconnected() -> Self {
        Self { address: None }
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Address shortened for the header, e.g. `0x1234…cdef`.
    #[must_use]
    pub fn short_address(&self) -> Option<String> {
        let address = self.address.as_deref()?;
        let chars: Vec<char> = address.chars().collect();
        if chars.len() <= 10 {
            return Some(address.to_owned());
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        Some(format!("{head}…{tail}"))
    }
}
