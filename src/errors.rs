use thiserror::Error;

/// Failures surfaced by the REST client and page controllers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error("Falha de rede: {0}")]
    Network(String),
    #[error("Erro HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("{0}")]
    Api(String),
    #[error("Resposta inválida do servidor: {0}")]
    Decode(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<gloo_net::Error> for AppError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => AppError::Decode(e.to_string()),
            other => AppError::Network(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

/// First problem found while checking a form before it is posted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Preencha o campo obrigatório: {0}")]
    Required(&'static str),
    #[error("{field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Input rejected by one of the date/currency calculators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Quantidade de parcelas deve ser maior que zero")]
    ZeroInstallments,
    #[error("Prazo deve ser maior que zero")]
    ZeroTerm,
    #[error("Valor deve ser maior que zero: {0}")]
    NonPositiveAmount(&'static str),
    #[error("Percentual inválido: {0}")]
    InvalidPercent(&'static str),
    #[error("Dia do mês fora do intervalo 1..=31: {0}")]
    DayOutOfRange(u32),
    #[error("Data fora do intervalo suportado")]
    DateOverflow,
    #[error("Amortização extra após a parcela {0} fora do prazo")]
    PrepaymentOutOfRange(u32),
}

/// A `recorrencia` value that does not match any known encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurrenceError {
    #[error("Recorrência desconhecida: {0}")]
    Unknown(String),
    #[error("Intervalo inválido em {0}")]
    InvalidInterval(String),
    #[error("Dia da semana inválido em {0}")]
    InvalidWeekday(String),
    #[error("Parcela inválida em {0}")]
    InvalidInstallment(String),
}

impl From<CalcError> for AppError {
    fn from(err: CalcError) -> Self {
        AppError::Validation(ValidationError::Invalid {
            field: "cálculo",
            reason: err.to_string(),
        })
    }
}
