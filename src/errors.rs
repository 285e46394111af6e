use thiserror::Error;

/// Erros possíveis durante a ingestão de extratos bancários.
///
/// Conteúdo malformado nunca vira erro: linhas ou blocos ilegíveis são
/// descartados. Só falta de entrada (ou entrada grande demais) falha.
#[derive(Error, Debug)]
pub enum StatementParseError {
    /// O builder foi chamado sem fornecer conteúdo nem caminho de arquivo
    #[error("Content or filepath is required")]
    MissingContentAndFilepath,

    /// Erro ao ler o conteúdo do arquivo do disco
    #[error("Failed to read file content: {0}")]
    ReadContentFailed(#[from] std::io::Error),

    /// Arquivo sem nenhuma linha não-vazia
    #[error("File is empty")]
    EmptyFile,

    /// Conteúdo acima do limite configurado em `ParseLimits`
    #[error("File is too large: {size} bytes exceeds the {limit} byte limit")]
    ContentTooLarge { size: usize, limit: usize },

    /// Falha genérica de conversão (detalhe na mensagem)
    #[error("Parse failed: {0}")]
    ParseFailed(String),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Alias conveniente para Result com nosso tipo de erro principal
pub type StatementResult<T> = Result<T, StatementParseError>;
