//! Prompt construction for reply suggestions.
//!
//! Replies are written in Brazilian Portuguese for a financial-sector
//! customer-success team.

use super::types::Category;

/// Only the head of the original email is embedded in the prompt.
pub const MAX_EMAIL_CHARS: usize = 1500;

/// Fixed system instruction for the suggestion model.
pub fn build_suggestion_system_prompt() -> String {
    "Você é um assistente de Customer Success de uma grande empresa do setor financeiro. \
     Sua função é redigir respostas automáticas a emails de clientes com profissionalismo, \
     clareza e empatia.\n\n\
     DIRETRIZES GERAIS:\n\
     - Concisão: de 1 a 3 frases, direto ao ponto.\n\
     - Linguagem: português brasileiro formal, cordial e acolhedor.\n\
     - Foco: resolva o problema do cliente ou indique com clareza o próximo passo.\n\
     - Proatividade: ofereça ajuda ou agradeça, conforme a situação.\n\
     - Veracidade: nunca invente informações; se faltarem dados, seja genérico e indique os canais de suporte.\n\
     - Sem redundâncias: evite frases desnecessárias.\n\
     - Siga SEMPRE as 'INSTRUÇÕES ESPECÍFICAS POR CATEGORIA' do prompt do usuário; elas definem o tom e o nível de detalhe."
        .to_string()
}

/// User prompt embedding the category, the email head and category guidance.
pub fn build_suggestion_user_prompt(category: &Category, email_content: &str) -> String {
    let excerpt: String = email_content.chars().take(MAX_EMAIL_CHARS).collect();

    let mut prompt = String::with_capacity(excerpt.len() + 1024);
    prompt.push_str(
        "Analise o email do cliente abaixo e gere uma resposta apropriada, seguindo as \
         diretrizes gerais e as instruções específicas da categoria identificada.\n\n",
    );
    prompt.push_str(&format!("CATEGORIA DO EMAIL: {}\n\n", category.label()));
    prompt.push_str("CONTEÚDO DO EMAIL:\n```\n");
    prompt.push_str(&excerpt);
    prompt.push_str("\n```\n\n");
    prompt.push_str("INSTRUÇÕES ESPECÍFICAS POR CATEGORIA:\n");
    prompt.push_str(category_instructions(category));
    prompt.push_str(
        "\n\nForneça apenas a resposta sugerida, sem introduções ou comentários adicionais.",
    );
    prompt
}

/// Guidance block per category; unknown labels get a generic one.
pub fn category_instructions(category: &Category) -> &'static str {
    match category {
        Category::Productive => {
            "- O cliente precisa de uma ação ou informação específica.\n\
             - Objetivo: dar uma solução direta, confirmar um status ou indicar o próximo passo.\n\
             - Tom: proativo, seguro e eficiente, com compromisso claro com a resolução.\n\
             - Ação: se necessário, peça informações adicionais de forma precisa e justificada.\n\
             - Exemplo: \"Prezado(a) [Nome do Cliente], recebemos sua solicitação e já estamos analisando. \
             Em breve retornaremos com a solução.\""
        }
        Category::Unproductive => {
            "- O email não exige ação imediata ou tem caráter informal.\n\
             - Objetivo: agradecer com cordialidade e encerrar a conversa sem prolongá-la.\n\
             - Tom: simpático, breve e gentil.\n\
             - Ação: não inicie novos assuntos nem peça informações desnecessárias.\n\
             - Exemplo: \"Agradecemos o seu contato e a mensagem. Tenha um excelente dia!\""
        }
        Category::Other(_) => {
            "- Responda de forma profissional e educada, com concisão e foco na cordialidade."
        }
    }
}
