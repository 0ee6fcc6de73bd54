use portpick_common::network::host::{HostRequest, HostSet};
use portpick_core::{HostEnumerator, SystemHosts};

use crate::terminal::print;

pub fn hosts(request: &HostRequest, quiet: bool) {
    print::header("target hosts", quiet);

    let hosts: HostSet = SystemHosts.resolve_target_hosts(request);
    for host in &hosts {
        print::result(&host.to_string());
    }
    print::summary(&format!("{} host(s) to probe", hosts.len()), quiet);
}
