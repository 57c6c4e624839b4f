//! Message contract emission

use super::Generator;
use super::naming::{doc_comment, upper_case_identifier};
use lspgen_core::{Message, MessageDirection, MessageKind, MessageRole, MetaModelResult};
use tracing::debug;

/// Role impls are written in this order.
const ROLE_ORDER: [MessageRole; 5] = [
    MessageRole::RegistrationOptions,
    MessageRole::PartialResult,
    MessageRole::ErrorData,
    MessageRole::Params,
    MessageRole::Result,
];

fn direction_name(direction: MessageDirection) -> &'static str {
    match direction {
        MessageDirection::ClientToServer => "ClientToServer",
        MessageDirection::ServerToClient => "ServerToClient",
        MessageDirection::Both => "Bidirectional",
    }
}

fn kind_name(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Request => "Request",
        MessageKind::Notification => "Notification",
    }
}

impl<'a> Generator<'a> {
    /// Emit a unit struct for a message with its contract and role impls.
    pub(crate) fn emit_message(&mut self, message: &'a Message, kind: MessageKind) -> MetaModelResult<()> {
        let ident = upper_case_identifier(&message.method);

        let mut code = String::from("\n");
        code.push_str(&doc_comment(&message.method, &message.documentation, "    "));
        code.push_str(&format!(
            "    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]\n    \
             pub struct {ident};\n\n    \
             impl MessageContract for {ident} {{\n        \
             const METHOD: &'static str = {:?};\n        \
             const DIRECTION: MessageDirection = MessageDirection::{};\n        \
             const KIND: MessageKind = MessageKind::{};\n    }}\n",
            message.method,
            direction_name(message.direction),
            kind_name(kind)
        ));

        for role in ROLE_ORDER {
            if let Some(name) = message.role(role) {
                let title = role.title();
                code.push_str(&format!(
                    "\n    impl Has{title} for {ident} {{\n        type {title} = {};\n    }}\n",
                    self.reference_name(name)?
                ));
            }
        }

        self.messages.push_str(&code);

        debug!(method = %message.method, kind = %kind, "Emitted message");
        Ok(())
    }
}
