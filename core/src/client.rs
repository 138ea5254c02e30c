//! Root client handle.

use std::sync::Arc;

use crate::applications::Applications;
use crate::info::Info;
use crate::operations::Operations;
use crate::organizations::Organizations;
use crate::processes::Processes;
use crate::service_bindings::ServiceBindings;
use crate::service_instances::ServiceInstances;
use crate::shared_domains::SharedDomains;
use crate::spaces::Spaces;
use crate::transport::Transport;
use crate::users::Users;

/// Typed client for a Cloud Controller.
///
/// Holds a [`Transport`] and the API root URL (e.g.
/// `https://api.example.com`) and exposes one handle per resource kind. The
/// client carries no mutable state; independent operations and traversals
/// may run concurrently against the same instance.
pub struct CloudFoundryClient {
    applications: Applications,
    info: Info,
    organizations: Organizations,
    processes: Processes,
    service_bindings: ServiceBindings,
    service_instances: ServiceInstances,
    shared_domains: SharedDomains,
    spaces: Spaces,
    users: Users,
}

impl CloudFoundryClient {
    pub fn new(transport: Arc<dyn Transport>, root: &str) -> Self {
        let ops = Operations::new(transport, root);
        Self {
            applications: Applications::new(ops.clone()),
            info: Info::new(ops.clone()),
            organizations: Organizations::new(ops.clone()),
            processes: Processes::new(ops.clone()),
            service_bindings: ServiceBindings::new(ops.clone()),
            service_instances: ServiceInstances::new(ops.clone()),
            shared_domains: SharedDomains::new(ops.clone()),
            spaces: Spaces::new(ops.clone()),
            users: Users::new(ops),
        }
    }

    pub fn applications(&self) -> &Applications {
        &self.applications
    }

    pub fn info(&self) -> &Info {
        &self.info
    }

    pub fn organizations(&self) -> &Organizations {
        &self.organizations
    }

    pub fn processes(&self) -> &Processes {
        &self.processes
    }

    pub fn service_bindings(&self) -> &ServiceBindings {
        &self.service_bindings
    }

    pub fn service_instances(&self) -> &ServiceInstances {
        &self.service_instances
    }

    pub fn shared_domains(&self) -> &SharedDomains {
        &self.shared_domains
    }

    pub fn spaces(&self) -> &Spaces {
        &self.spaces
    }

    pub fn users(&self) -> &Users {
        &self.users
    }
}
